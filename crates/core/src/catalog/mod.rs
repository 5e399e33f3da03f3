//! Static study content and loaders for externally supplied catalogs.

mod builtin;

use std::collections::HashSet;
use thiserror::Error;

use crate::model::{Question, QuestionError, Scale, ScaleError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Scale(#[from] ScaleError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("catalog repeats id {0}")]
    DuplicateId(String),
}

/// The built-in scale flashcards in their canonical order.
#[must_use]
pub fn default_scales() -> Vec<Scale> {
    builtin::SCALES
        .iter()
        .map(|(id, root, kind, notes)| Scale::from_parts(id, root, kind, notes))
        .collect()
}

/// The built-in progression question bank.
#[must_use]
pub fn default_questions() -> Vec<Question> {
    builtin::QUESTIONS
        .iter()
        .map(|(id, prompt, options, answer, explanation)| {
            Question::from_parts(id, prompt, options, answer, explanation)
        })
        .collect()
}

/// Parse a JSON array of `{ id, root, type, notes }` objects.
///
/// # Errors
///
/// Returns `CatalogError` if the JSON is malformed, a scale is invalid, or an
/// id appears twice.
pub fn scales_from_json(raw: &str) -> Result<Vec<Scale>, CatalogError> {
    let parsed: Vec<Scale> = serde_json::from_str(raw)?;
    let scales = parsed
        .into_iter()
        .map(Scale::validate)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique(scales.iter().map(|scale| scale.id().as_str()))?;
    Ok(scales)
}

/// Parse a JSON array of `{ id, question, options, correctAnswer, explanation }` objects.
///
/// # Errors
///
/// Returns `CatalogError` if the JSON is malformed, a question is invalid, or
/// an id appears twice.
pub fn questions_from_json(raw: &str) -> Result<Vec<Question>, CatalogError> {
    let parsed: Vec<Question> = serde_json::from_str(raw)?;
    let questions = parsed
        .into_iter()
        .map(Question::validate)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique(questions.iter().map(|question| question.id().as_str()))?;
    Ok(questions)
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId(id.to_owned()));
        }
    }
    Ok(())
}
