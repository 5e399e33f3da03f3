use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,
    #[error("question {id} has no prompt")]
    EmptyPrompt { id: String },
    #[error("question {id} needs at least two options")]
    TooFewOptions { id: String },
    #[error("question {id} lists option {option:?} more than once")]
    DuplicateOption { id: String, option: String },
    #[error("question {id}: correct answer {answer:?} is not one of its options")]
    AnswerNotAnOption { id: String, answer: String },
}

/// A multiple-choice question from the progression bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "question")]
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the options are too few or repeated, or the
    /// correct answer is not among them.
    pub fn new<O, S>(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: O,
        correct_answer: impl Into<String>,
        explanation: Option<&str>,
    ) -> Result<Self, QuestionError>
    where
        O: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
            explanation: explanation.map(str::to_owned),
        }
        .validate()
    }

    pub(crate) fn from_parts(
        id: &str,
        prompt: &str,
        options: &[&str],
        correct_answer: &str,
        explanation: &str,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.to_owned(),
            options: options.iter().map(|option| (*option).to_owned()).collect(),
            correct_answer: correct_answer.to_owned(),
            explanation: Some(explanation.to_owned()),
        }
    }

    /// Check invariants on a question that came from an external catalog.
    ///
    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn validate(self) -> Result<Self, QuestionError> {
        let id = self.id.to_string();
        if id.trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions { id });
        }
        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.clone(),
                });
            }
        }
        if !seen.contains(self.correct_answer.as_str()) {
            return Err(QuestionError::AnswerNotAnOption {
                id,
                answer: self.correct_answer,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}
