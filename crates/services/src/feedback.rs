/// How an option should be shown once the question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Unmarked,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedOption {
    pub label: String,
    pub mark: OptionMark,
}

/// Result of submitting an answer, ready for a view layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub message: String,
    /// Options in display order. The correct one is always marked `Correct`;
    /// a wrong pick is marked `Incorrect`.
    pub options: Vec<MarkedOption>,
}

impl AnswerFeedback {
    pub(crate) fn new(
        options: &[String],
        selected: &str,
        correct_answer: &str,
        message: String,
    ) -> Self {
        let is_correct = selected == correct_answer;
        let options = options
            .iter()
            .map(|label| {
                let mark = if label == correct_answer {
                    OptionMark::Correct
                } else if label == selected {
                    OptionMark::Incorrect
                } else {
                    OptionMark::Unmarked
                };
                MarkedOption {
                    label: label.clone(),
                    mark,
                }
            })
            .collect();

        Self {
            selected: selected.to_owned(),
            correct_answer: correct_answer.to_owned(),
            is_correct,
            message,
            options,
        }
    }
}

/// Options before any answer: all unmarked.
pub(crate) fn unmarked(options: &[String]) -> Vec<MarkedOption> {
    options
        .iter()
        .map(|label| MarkedOption {
            label: label.clone(),
            mark: OptionMark::Unmarked,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["A", "B", "C", "D"].into_iter().map(String::from).collect()
    }

    #[test]
    fn wrong_pick_marks_both_choice_and_answer() {
        let feedback = AnswerFeedback::new(&options(), "B", "D", String::new());
        let marks: Vec<_> = feedback.options.iter().map(|o| o.mark).collect();
        assert_eq!(
            marks,
            vec![
                OptionMark::Unmarked,
                OptionMark::Incorrect,
                OptionMark::Unmarked,
                OptionMark::Correct
            ]
        );
        assert!(!feedback.is_correct);
    }

    #[test]
    fn right_pick_marks_only_the_answer() {
        let feedback = AnswerFeedback::new(&options(), "A", "A", String::new());
        assert!(feedback.is_correct);
        assert_eq!(feedback.options[0].mark, OptionMark::Correct);
        assert!(
            feedback.options[1..]
                .iter()
                .all(|option| option.mark == OptionMark::Unmarked)
        );
    }
}
