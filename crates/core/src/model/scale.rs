use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ScaleId;
use crate::model::note::format_note;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScaleError {
    #[error("scale id cannot be empty")]
    EmptyId,
    #[error("scale {id} has no root note")]
    EmptyRoot { id: String },
    #[error("scale {id} has no notes")]
    NoNotes { id: String },
}

/// A scale flashcard: the front shows root and type, the back the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    id: ScaleId,
    root: String,
    #[serde(rename = "type")]
    kind: String,
    notes: Vec<String>,
}

impl Scale {
    /// Build a validated scale.
    ///
    /// # Errors
    ///
    /// Returns `ScaleError` if the id or root is blank or `notes` is empty.
    pub fn new<N, S>(
        id: impl Into<String>,
        root: impl Into<String>,
        kind: impl Into<String>,
        notes: N,
    ) -> Result<Self, ScaleError>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: ScaleId::new(id),
            root: root.into(),
            kind: kind.into(),
            notes: notes.into_iter().map(Into::into).collect(),
        }
        .validate()
    }

    pub(crate) fn from_parts(id: &str, root: &str, kind: &str, notes: &[&str]) -> Self {
        Self {
            id: ScaleId::new(id),
            root: root.to_owned(),
            kind: kind.to_owned(),
            notes: notes.iter().map(|note| (*note).to_owned()).collect(),
        }
    }

    /// Check invariants on a scale that came from an external catalog.
    ///
    /// # Errors
    ///
    /// Returns `ScaleError` if the id or root is blank or `notes` is empty.
    pub fn validate(self) -> Result<Self, ScaleError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ScaleError::EmptyId);
        }
        if self.root.trim().is_empty() {
            return Err(ScaleError::EmptyRoot {
                id: self.id.to_string(),
            });
        }
        if self.notes.is_empty() {
            return Err(ScaleError::NoNotes {
                id: self.id.to_string(),
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> &ScaleId {
        &self.id
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Scale type as written in the catalog (`major`, `minor`, ...).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Human-facing name such as `F♯ Major`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.kind.chars();
        let kind = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{} {kind}", format_note(&self.root)).trim_end().to_string()
    }

    /// Notes joined for the back of the card, e.g. `C - D - E`.
    #[must_use]
    pub fn notes_line(&self) -> String {
        self.notes.join(" - ")
    }
}
