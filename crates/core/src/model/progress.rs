use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{QuestionId, ScaleId};

//
// ─── NAMESPACES ────────────────────────────────────────────────────────────────
//

/// One of the three independent progress sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Scales,
    CircleOfFifths,
    ScaleProgression,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [
        Namespace::Scales,
        Namespace::CircleOfFifths,
        Namespace::ScaleProgression,
    ];

    /// Key of this namespace in the persisted JSON record.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Namespace::Scales => "scales",
            Namespace::CircleOfFifths => "circleOfFifths",
            Namespace::ScaleProgression => "scaleProgression",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.key() == s)
            .ok_or_else(|| format!("unknown progress namespace: {s}"))
    }
}

//
// ─── SECTIONS ──────────────────────────────────────────────────────────────────
//

/// Flashcard navigator progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScalesProgress {
    pub completed: Vec<ScaleId>,
    pub current_index: usize,
    pub shuffle_mode: bool,
}

/// Circle-of-fifths trainer counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleProgress {
    pub score: u32,
    pub total_attempts: u32,
    pub correct_answers: u32,
}

/// Progression quiz counters and the ids already asked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionProgress {
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub completed_questions: Vec<QuestionId>,
}

/// A typed view of one namespace inside [`ProgressRecord`].
pub trait Section: Clone + Default + Serialize + DeserializeOwned {
    const NAMESPACE: Namespace;

    fn get(record: &ProgressRecord) -> &Self;

    fn get_mut(record: &mut ProgressRecord) -> &mut Self;
}

impl Section for ScalesProgress {
    const NAMESPACE: Namespace = Namespace::Scales;

    fn get(record: &ProgressRecord) -> &Self {
        &record.scales
    }

    fn get_mut(record: &mut ProgressRecord) -> &mut Self {
        &mut record.scales
    }
}

impl Section for CircleProgress {
    const NAMESPACE: Namespace = Namespace::CircleOfFifths;

    fn get(record: &ProgressRecord) -> &Self {
        &record.circle_of_fifths
    }

    fn get_mut(record: &mut ProgressRecord) -> &mut Self {
        &mut record.circle_of_fifths
    }
}

impl Section for ProgressionProgress {
    const NAMESPACE: Namespace = Namespace::ScaleProgression;

    fn get(record: &ProgressRecord) -> &Self {
        &record.scale_progression
    }

    fn get_mut(record: &mut ProgressRecord) -> &mut Self {
        &mut record.scale_progression
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// Everything the study tool remembers between runs.
///
/// Serialized as a single JSON object with one key per [`Namespace`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressRecord {
    pub scales: ScalesProgress,
    pub circle_of_fifths: CircleProgress,
    pub scale_progression: ProgressionProgress,
}

impl ProgressRecord {
    #[must_use]
    pub fn section<S: Section>(&self) -> &S {
        S::get(self)
    }

    pub fn section_mut<S: Section>(&mut self) -> &mut S {
        S::get_mut(self)
    }

    /// Restore one namespace to its default shape.
    pub fn reset(&mut self, namespace: Namespace) {
        match namespace {
            Namespace::Scales => self.scales = ScalesProgress::default(),
            Namespace::CircleOfFifths => self.circle_of_fifths = CircleProgress::default(),
            Namespace::ScaleProgression => {
                self.scale_progression = ProgressionProgress::default();
            }
        }
    }
}
