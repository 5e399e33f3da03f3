use chrono::{DateTime, Duration, Utc};
use rand::{Rng, rng};
use storage::ProgressStore;
use theory_core::Clock;
use theory_core::model::{CIRCLE_OF_FIFTHS, CircleProgress};
use tracing::{debug, info};

use crate::feedback::{self, AnswerFeedback, MarkedOption};
use crate::random;

/// How long feedback stays up before the trainer moves on by itself.
pub const AUTO_ADVANCE_DELAY_MS: i64 = 2_000;

/// Number of options offered per question, the correct one included.
pub const OPTION_COUNT: usize = 4;

/// "What comes after X?" for one note of the circle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleQuestion {
    pub current_note: String,
    pub correct_answer: String,
    pub prompt: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleView {
    pub prompt: String,
    pub options: Vec<MarkedOption>,
    pub feedback: Option<String>,
    pub locked: bool,
    pub score: CircleProgress,
}

/// The correct answer plus distinct wrong notes from the rest of the circle,
/// shuffled together.
#[must_use]
pub fn generate_answer_options(correct_answer: &str) -> Vec<String> {
    let others: Vec<String> = CIRCLE_OF_FIFTHS
        .iter()
        .filter(|note| **note != correct_answer)
        .map(|note| (*note).to_owned())
        .collect();
    let mut options = random::pick_n(&others, OPTION_COUNT - 1);
    options.push(correct_answer.to_owned());
    random::shuffle(&options)
}

/// Endless random drill on the circle of fifths.
///
/// After an answer the question locks and a new one is due
/// [`AUTO_ADVANCE_DELAY_MS`] later. The deferred advance is a deadline, not a
/// cancelable timer: whoever drives the trainer calls [`poll_advance`] and the
/// new question lands on top of whatever state is current at that point.
///
/// [`poll_advance`]: CircleOfFifthsTrainer::poll_advance
pub struct CircleOfFifthsTrainer {
    store: ProgressStore,
    clock: Clock,
    progress: CircleProgress,
    question: Option<CircleQuestion>,
    feedback: Option<AnswerFeedback>,
    advance_at: Option<DateTime<Utc>>,
}

impl CircleOfFifthsTrainer {
    #[must_use]
    pub fn new(store: ProgressStore) -> Self {
        let progress = store.section::<CircleProgress>();
        Self {
            store,
            clock: Clock::default(),
            progress,
            question: None,
            feedback: None,
            advance_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Pick a random note and ask for its successor. Unlocks answering.
    pub fn generate_question(&mut self) -> &CircleQuestion {
        let len = CIRCLE_OF_FIFTHS.len();
        let index = rng().random_range(0..len);
        let current_note = CIRCLE_OF_FIFTHS[index];
        let correct_answer = CIRCLE_OF_FIFTHS[(index + 1) % len];

        debug!(note = current_note, "circle question generated");
        self.feedback = None;
        self.question.insert(CircleQuestion {
            current_note: current_note.to_owned(),
            correct_answer: correct_answer.to_owned(),
            prompt: format!("What comes after {current_note} in the circle of fifths?"),
            options: generate_answer_options(correct_answer),
        })
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&CircleQuestion> {
        self.question.as_ref()
    }

    /// Grade `choice` against the current question.
    ///
    /// Returns `None` without touching any state when there is no question or
    /// the current one was already answered.
    pub fn submit_answer(&mut self, choice: &str) -> Option<AnswerFeedback> {
        if self.feedback.is_some() {
            debug!("circle question already answered; ignoring");
            return None;
        }
        let question = self.question.as_ref()?;

        let is_correct = choice == question.correct_answer;
        self.progress.total_attempts = self.progress.total_attempts.saturating_add(1);
        if is_correct {
            self.progress.score = self.progress.score.saturating_add(1);
            self.progress.correct_answers = self.progress.correct_answers.saturating_add(1);
        }

        let message = if is_correct {
            format!(
                "Correct! {} comes after {}.",
                question.correct_answer, question.current_note
            )
        } else {
            format!("Incorrect. The correct answer is {}.", question.correct_answer)
        };
        let feedback = AnswerFeedback::new(
            &question.options,
            choice,
            &question.correct_answer,
            message,
        );

        self.save();
        self.advance_at = Some(
            self.clock
                .deadline_after(Duration::milliseconds(AUTO_ADVANCE_DELAY_MS)),
        );
        self.feedback = Some(feedback.clone());
        Some(feedback)
    }

    /// When the pending auto-advance is due, if one is scheduled.
    #[must_use]
    pub fn advance_deadline(&self) -> Option<DateTime<Utc>> {
        self.advance_at
    }

    /// Fire the scheduled advance if it is due by the trainer's clock.
    pub fn poll_advance(&mut self) -> bool {
        self.poll_advance_at(self.clock.now())
    }

    /// Fire the scheduled advance if it is due at `now`.
    ///
    /// Returns `true` when a new question was generated.
    pub fn poll_advance_at(&mut self, now: DateTime<Utc>) -> bool {
        match self.advance_at {
            Some(due) if now >= due => {
                self.advance_at = None;
                self.generate_question();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.feedback.is_some()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &CircleProgress {
        &self.progress
    }

    /// Zero the counters and start a fresh question.
    ///
    /// A pending auto-advance stays scheduled and will still replace the
    /// question when it fires.
    pub fn reset(&mut self) {
        self.progress = CircleProgress::default();
        self.save();
        info!("circle of fifths progress reset");
        self.generate_question();
    }

    #[must_use]
    pub fn view(&self) -> Option<CircleView> {
        let question = self.question.as_ref()?;
        let options = match &self.feedback {
            Some(feedback) => feedback.options.clone(),
            None => feedback::unmarked(&question.options),
        };
        Some(CircleView {
            prompt: question.prompt.clone(),
            options,
            feedback: self.feedback.as_ref().map(|f| f.message.clone()),
            locked: self.is_locked(),
            score: self.progress.clone(),
        })
    }

    fn save(&self) {
        let progress = self.progress.clone();
        self.store.update::<CircleProgress>(|circle| *circle = progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use storage::{InMemoryStore, KeyValueStore, PROGRESS_KEY};
    use theory_core::model::note;
    use theory_core::time::fixed_now;

    fn trainer() -> (ProgressStore, CircleOfFifthsTrainer) {
        let store = ProgressStore::new(Arc::new(InMemoryStore::new()));
        let trainer =
            CircleOfFifthsTrainer::new(store.clone()).with_clock(Clock::fixed(fixed_now()));
        (store, trainer)
    }

    fn wrong_option(question: &CircleQuestion) -> String {
        question
            .options
            .iter()
            .find(|option| **option != question.correct_answer)
            .cloned()
            .unwrap()
    }

    #[test]
    fn generated_question_asks_for_the_successor() {
        let (_, mut trainer) = trainer();
        for _ in 0..50 {
            let question = trainer.generate_question().clone();
            assert_eq!(
                Some(question.correct_answer.as_str()),
                note::successor(&question.current_note)
            );
            assert_eq!(
                question.prompt,
                format!("What comes after {} in the circle of fifths?", question.current_note)
            );
        }
    }

    #[test]
    fn options_are_four_distinct_notes_including_the_answer() {
        for correct in CIRCLE_OF_FIFTHS {
            let options = generate_answer_options(correct);
            assert_eq!(options.len(), OPTION_COUNT);
            let unique: HashSet<_> = options.iter().collect();
            assert_eq!(unique.len(), OPTION_COUNT);
            assert_eq!(options.iter().filter(|o| *o == correct).count(), 1);
            assert!(options.iter().all(|o| CIRCLE_OF_FIFTHS.contains(&o.as_str())));
        }
    }

    #[test]
    fn correct_answer_scores_and_persists() {
        let (store, mut trainer) = trainer();
        let answer = trainer.generate_question().correct_answer.clone();

        let feedback = trainer.submit_answer(&answer).unwrap();

        assert!(feedback.is_correct);
        assert!(feedback.message.starts_with("Correct!"));
        let expected = CircleProgress {
            score: 1,
            total_attempts: 1,
            correct_answers: 1,
        };
        assert_eq!(trainer.progress(), &expected);
        assert_eq!(store.section::<CircleProgress>(), expected);
    }

    #[test]
    fn wrong_answer_counts_an_attempt_only() {
        let (_, mut trainer) = trainer();
        let question = trainer.generate_question().clone();

        let feedback = trainer.submit_answer(&wrong_option(&question)).unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(
            feedback.message,
            format!("Incorrect. The correct answer is {}.", question.correct_answer)
        );
        assert_eq!(trainer.progress().total_attempts, 1);
        assert_eq!(trainer.progress().score, 0);
    }

    #[test]
    fn answered_question_is_locked() {
        let (_, mut trainer) = trainer();
        let answer = trainer.generate_question().correct_answer.clone();
        trainer.submit_answer(&answer).unwrap();

        assert!(trainer.is_locked());
        assert!(trainer.submit_answer(&answer).is_none());
        assert_eq!(trainer.progress().total_attempts, 1);
    }

    #[test]
    fn submit_without_question_is_a_no_op() {
        let (store, mut trainer) = trainer();
        assert!(trainer.submit_answer("G").is_none());
        assert_eq!(store.section::<CircleProgress>(), CircleProgress::default());
    }

    #[test]
    fn advance_fires_only_after_the_delay() {
        let (_, mut trainer) = trainer();
        let answer = trainer.generate_question().correct_answer.clone();
        trainer.submit_answer(&answer).unwrap();

        let due = trainer.advance_deadline().unwrap();
        assert_eq!(due, fixed_now() + Duration::milliseconds(AUTO_ADVANCE_DELAY_MS));

        assert!(!trainer.poll_advance());
        assert!(!trainer.poll_advance_at(due - Duration::milliseconds(1)));
        assert!(trainer.is_locked());

        assert!(trainer.poll_advance_at(due));
        assert!(!trainer.is_locked());
        assert!(trainer.advance_deadline().is_none());
        assert!(!trainer.poll_advance_at(due + Duration::seconds(10)));
    }

    #[test]
    fn reset_before_advance_keeps_the_deferred_transition() {
        let (store, mut trainer) = trainer();
        let answer = trainer.generate_question().correct_answer.clone();
        trainer.submit_answer(&answer).unwrap();
        let due = trainer.advance_deadline().unwrap();

        trainer.reset();
        assert_eq!(store.section::<CircleProgress>(), CircleProgress::default());
        assert!(!trainer.is_locked());

        assert!(trainer.poll_advance_at(due));
        assert!(trainer.current_question().is_some());
        assert_eq!(trainer.progress(), &CircleProgress::default());
    }

    #[test]
    fn restores_counters_from_store() {
        let (store, _) = trainer();
        store.update::<CircleProgress>(|circle| {
            circle.score = 4;
            circle.total_attempts = 6;
            circle.correct_answers = 4;
        });

        let trainer = CircleOfFifthsTrainer::new(store);
        assert_eq!(trainer.progress().total_attempts, 6);
    }

    #[test]
    fn view_marks_options_after_answering() {
        let (_, mut trainer) = trainer();
        let question = trainer.generate_question().clone();
        let view = trainer.view().unwrap();
        assert!(!view.locked);
        assert!(view.feedback.is_none());
        assert_eq!(view.options.len(), OPTION_COUNT);

        trainer.submit_answer(&wrong_option(&question)).unwrap();
        let view = trainer.view().unwrap();
        assert!(view.locked);
        assert!(view.feedback.is_some());
        assert_eq!(view.score.total_attempts, 1);
    }

    #[test]
    fn counters_saturate_at_their_limit() {
        let backend = InMemoryStore::new();
        backend
            .set(
                PROGRESS_KEY,
                r#"{ "circleOfFifths": {
                    "score": 4294967295,
                    "totalAttempts": 4294967295,
                    "correctAnswers": 4294967295
                } }"#,
            )
            .unwrap();
        let store = ProgressStore::new(Arc::new(backend));
        let mut trainer = CircleOfFifthsTrainer::new(store.clone());
        let answer = trainer.generate_question().correct_answer.clone();

        assert!(trainer.submit_answer(&answer).unwrap().is_correct);

        let maxed = CircleProgress {
            score: u32::MAX,
            total_attempts: u32::MAX,
            correct_answers: u32::MAX,
        };
        assert_eq!(trainer.progress(), &maxed);
        assert_eq!(store.section::<CircleProgress>(), maxed);
    }
}
