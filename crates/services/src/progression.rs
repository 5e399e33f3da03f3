use storage::ProgressStore;
use theory_core::model::{ProgressionProgress, Question};
use tracing::{debug, info};

use crate::feedback::{self, AnswerFeedback, MarkedOption};
use crate::random;

/// A question being asked, with its options in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    question: Question,
    options: Vec<String>,
    feedback: Option<AnswerFeedback>,
}

impl ActiveQuestion {
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.feedback.is_some()
    }
}

/// Final score once every question has been asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizTally {
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
}

impl QuizTally {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Quiz Complete! You answered {} out of {} questions correctly.",
            self.correct_answers, self.total_questions
        )
    }
}

/// Outcome of asking for the next question.
#[derive(Debug, PartialEq, Eq)]
pub enum NextQuestion<'a> {
    Ready(&'a ActiveQuestion),
    Complete(QuizTally),
    /// The bank has no questions at all.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionView {
    Question {
        prompt: String,
        options: Vec<MarkedOption>,
        feedback: Option<String>,
        locked: bool,
        score: u32,
        total_questions: u32,
    },
    Complete {
        tally: QuizTally,
        message: String,
    },
    Empty,
}

/// Works through the question bank without repeats.
///
/// Each question is asked at most once per run: answering marks it completed
/// whether or not the answer was right. There is no auto-advance; the caller
/// asks for the next question explicitly.
pub struct ScaleProgressionQuiz {
    store: ProgressStore,
    bank: Vec<Question>,
    progress: ProgressionProgress,
    current: Option<ActiveQuestion>,
    complete: bool,
}

impl ScaleProgressionQuiz {
    #[must_use]
    pub fn new(store: ProgressStore, bank: Vec<Question>) -> Self {
        let progress = store.section::<ProgressionProgress>();
        let mut quiz = Self {
            store,
            bank,
            progress,
            current: None,
            complete: false,
        };
        quiz.sync_total();
        quiz
    }

    /// Swap in a new question bank. Completed ids carry over; ids missing from
    /// the new bank are simply never drawn.
    pub fn set_catalog(&mut self, bank: Vec<Question>) {
        info!(questions = bank.len(), "question bank replaced");
        self.bank = bank;
        self.current = None;
        self.complete = false;
        self.sync_total();
    }

    #[must_use]
    pub fn catalog(&self) -> &[Question] {
        &self.bank
    }

    /// Questions not yet asked.
    #[must_use]
    pub fn remaining(&self) -> Vec<&Question> {
        self.bank
            .iter()
            .filter(|question| !self.progress.completed_questions.contains(question.id()))
            .collect()
    }

    /// Draw a random unasked question, or report that none are left.
    pub fn next_question(&mut self) -> NextQuestion<'_> {
        if self.bank.is_empty() {
            self.current = None;
            return NextQuestion::Empty;
        }

        let picked = random::pick_one(&self.remaining()).map(|q| (*q).clone());
        let Some(question) = picked else {
            self.current = None;
            self.complete = true;
            info!(
                correct = self.progress.correct_answers,
                total = self.progress.total_questions,
                "progression quiz complete"
            );
            return NextQuestion::Complete(self.tally());
        };

        debug!(id = %question.id(), "progression question loaded");
        self.complete = false;
        let options = random::shuffle(question.options());
        let active: &ActiveQuestion = self.current.insert(ActiveQuestion {
            question,
            options,
            feedback: None,
        });
        NextQuestion::Ready(active)
    }

    #[must_use]
    pub fn current(&self) -> Option<&ActiveQuestion> {
        self.current.as_ref()
    }

    /// Grade `choice` against the current question and retire the question.
    ///
    /// Returns `None` without touching any state when no question is active or
    /// the current one was already answered.
    pub fn submit_answer(&mut self, choice: &str) -> Option<AnswerFeedback> {
        let active = self.current.as_mut()?;
        if active.is_answered() {
            debug!("progression question already answered; ignoring");
            return None;
        }

        let question = &active.question;
        let is_correct = question.is_correct(choice);
        if is_correct {
            self.progress.score = self.progress.score.saturating_add(1);
            self.progress.correct_answers = self.progress.correct_answers.saturating_add(1);
        }
        if !self.progress.completed_questions.contains(question.id()) {
            self.progress.completed_questions.push(question.id().clone());
        }

        let explanation = question.explanation().unwrap_or_default();
        let message = if is_correct {
            format!("Correct! {explanation}")
        } else {
            format!(
                "Incorrect. The correct answer is {}. {explanation}",
                question.correct_answer()
            )
        };
        let feedback = AnswerFeedback::new(
            &active.options,
            choice,
            question.correct_answer(),
            message.trim_end().to_owned(),
        );
        active.feedback = Some(feedback.clone());

        self.save();
        Some(feedback)
    }

    /// Clear score, correct answers and completed ids, then load a fresh question.
    pub fn reset(&mut self) -> NextQuestion<'_> {
        self.progress.score = 0;
        self.progress.correct_answers = 0;
        self.progress.completed_questions.clear();
        self.complete = false;
        self.save();
        info!("progression quiz reset");
        self.next_question()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn tally(&self) -> QuizTally {
        QuizTally {
            score: self.progress.score,
            correct_answers: self.progress.correct_answers,
            total_questions: self.progress.total_questions,
        }
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressionProgress {
        &self.progress
    }

    #[must_use]
    pub fn view(&self) -> ProgressionView {
        if self.complete {
            let tally = self.tally();
            return ProgressionView::Complete {
                tally,
                message: tally.message(),
            };
        }
        let Some(active) = &self.current else {
            return ProgressionView::Empty;
        };
        let options = match &active.feedback {
            Some(feedback) => feedback.options.clone(),
            None => feedback::unmarked(&active.options),
        };
        ProgressionView::Question {
            prompt: active.question.prompt().to_owned(),
            options,
            feedback: active.feedback.as_ref().map(|f| f.message.clone()),
            locked: active.is_answered(),
            score: self.progress.score,
            total_questions: self.progress.total_questions,
        }
    }

    fn sync_total(&mut self) {
        self.progress.total_questions = u32::try_from(self.bank.len()).unwrap_or(u32::MAX);
        self.save();
    }

    fn save(&self) {
        let progress = self.progress.clone();
        self.store.update::<ProgressionProgress>(|quiz| *quiz = progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use storage::{InMemoryStore, KeyValueStore, PROGRESS_KEY};
    use theory_core::catalog::default_questions;
    use theory_core::model::QuestionId;

    fn store() -> ProgressStore {
        ProgressStore::new(Arc::new(InMemoryStore::new()))
    }

    fn five_questions() -> Vec<Question> {
        (1..=5)
            .map(|n| {
                Question::new(
                    format!("q{n}"),
                    format!("Question {n}?"),
                    ["right", "wrong-a", "wrong-b", "wrong-c"],
                    "right",
                    Some("Because."),
                )
                .unwrap()
            })
            .collect()
    }

    fn current_id(quiz: &ScaleProgressionQuiz) -> QuestionId {
        quiz.current().unwrap().question().id().clone()
    }

    #[test]
    fn answering_every_question_completes_the_quiz() {
        let mut quiz = ScaleProgressionQuiz::new(store(), five_questions());
        let mut asked = HashSet::new();

        for round in 0..5 {
            assert!(matches!(quiz.next_question(), NextQuestion::Ready(_)));
            assert!(asked.insert(current_id(&quiz)), "question repeated");
            let choice = if round % 2 == 0 { "right" } else { "wrong-a" };
            quiz.submit_answer(choice).unwrap();
        }

        let expected = QuizTally {
            score: 3,
            correct_answers: 3,
            total_questions: 5,
        };
        assert_eq!(quiz.next_question(), NextQuestion::Complete(expected));
        assert!(quiz.is_complete());

        let completed: HashSet<_> = quiz.progress().completed_questions.iter().cloned().collect();
        assert_eq!(quiz.progress().completed_questions.len(), 5);
        assert_eq!(completed, asked);
    }

    #[test]
    fn wrong_answers_still_retire_the_question() {
        let store = store();
        let mut quiz = ScaleProgressionQuiz::new(store.clone(), five_questions());
        quiz.next_question();
        let id = current_id(&quiz);

        let feedback = quiz.submit_answer("wrong-b").unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(feedback.message, "Incorrect. The correct answer is right. Because.");
        assert_eq!(quiz.remaining().len(), 4);
        let saved = store.section::<ProgressionProgress>();
        assert_eq!(saved.completed_questions, vec![id]);
        assert_eq!(saved.correct_answers, 0);
    }

    #[test]
    fn answered_question_is_locked_until_next() {
        let mut quiz = ScaleProgressionQuiz::new(store(), five_questions());
        quiz.next_question();
        let feedback = quiz.submit_answer("right").unwrap();
        assert_eq!(feedback.message, "Correct! Because.");

        assert!(quiz.submit_answer("right").is_none());
        assert_eq!(quiz.progress().score, 1);

        quiz.next_question();
        assert!(quiz.submit_answer("right").is_some());
    }

    #[test]
    fn complete_quiz_rejects_answers_until_reset() {
        let mut quiz = ScaleProgressionQuiz::new(store(), five_questions());
        for _ in 0..5 {
            quiz.next_question();
            quiz.submit_answer("right").unwrap();
        }
        assert!(matches!(quiz.next_question(), NextQuestion::Complete(_)));
        assert!(quiz.submit_answer("right").is_none());

        assert!(matches!(quiz.reset(), NextQuestion::Ready(_)));
        assert!(!quiz.is_complete());
        assert_eq!(quiz.progress().score, 0);
        assert_eq!(quiz.remaining().len(), 5);
    }

    #[test]
    fn reset_leaves_other_namespaces_alone() {
        let store = store();
        store.update::<theory_core::model::CircleProgress>(|circle| circle.score = 3);
        let mut quiz = ScaleProgressionQuiz::new(store.clone(), five_questions());
        quiz.next_question();
        quiz.submit_answer("right").unwrap();

        quiz.reset();

        let record = store.load();
        assert_eq!(record.circle_of_fifths.score, 3);
        assert!(record.scale_progression.completed_questions.is_empty());
        assert_eq!(record.scale_progression.total_questions, 5);
    }

    #[test]
    fn empty_bank_reports_no_data() {
        let mut quiz = ScaleProgressionQuiz::new(store(), Vec::new());
        assert_eq!(quiz.next_question(), NextQuestion::Empty);
        assert_eq!(quiz.view(), ProgressionView::Empty);
        assert!(quiz.submit_answer("anything").is_none());
    }

    #[test]
    fn completed_ids_survive_a_restart() {
        let store = store();
        let mut quiz = ScaleProgressionQuiz::new(store.clone(), five_questions());
        quiz.next_question();
        let id = current_id(&quiz);
        quiz.submit_answer("right").unwrap();

        let mut restarted = ScaleProgressionQuiz::new(store, five_questions());
        assert_eq!(restarted.remaining().len(), 4);
        for _ in 0..20 {
            restarted.next_question();
            assert_ne!(current_id(&restarted), id);
        }
    }

    #[test]
    fn total_questions_tracks_the_bank() {
        let store = store();
        let mut quiz = ScaleProgressionQuiz::new(store.clone(), default_questions());
        assert_eq!(quiz.tally().total_questions, 35);

        quiz.set_catalog(five_questions());
        assert_eq!(store.section::<ProgressionProgress>().total_questions, 5);
        assert!(quiz.current().is_none());
    }

    #[test]
    fn options_are_a_permutation_of_the_question_options() {
        let mut quiz = ScaleProgressionQuiz::new(store(), default_questions());
        quiz.next_question();
        let active = quiz.current().unwrap();
        let mut shown = active.options().to_vec();
        let mut original = active.question().options().to_vec();
        shown.sort();
        original.sort();
        assert_eq!(shown, original);
    }

    #[test]
    fn view_reflects_completion() {
        let mut quiz = ScaleProgressionQuiz::new(store(), five_questions());
        for _ in 0..5 {
            quiz.next_question();
            quiz.submit_answer("wrong-c").unwrap();
        }
        quiz.next_question();

        match quiz.view() {
            ProgressionView::Complete { message, .. } => assert_eq!(
                message,
                "Quiz Complete! You answered 0 out of 5 questions correctly."
            ),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn counters_saturate_at_their_limit() {
        let backend = InMemoryStore::new();
        backend
            .set(
                PROGRESS_KEY,
                r#"{ "scaleProgression": { "score": 4294967295, "correctAnswers": 4294967295 } }"#,
            )
            .unwrap();
        let store = ProgressStore::new(Arc::new(backend));
        let mut quiz = ScaleProgressionQuiz::new(store.clone(), five_questions());
        quiz.next_question();

        assert!(quiz.submit_answer("right").unwrap().is_correct);

        let saved = store.section::<ProgressionProgress>();
        assert_eq!(saved.score, u32::MAX);
        assert_eq!(saved.correct_answers, u32::MAX);
        assert_eq!(saved.completed_questions.len(), 1);
    }
}
