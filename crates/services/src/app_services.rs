use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use storage::sqlite::SqliteStore;
use storage::{InMemoryStore, ProgressStore};
use theory_core::Clock;
use theory_core::catalog::{self, default_questions, default_scales};
use theory_core::model::{Question, Scale};
use thiserror::Error;
use tracing::{debug, info};

use crate::circle::CircleOfFifthsTrainer;
use crate::error::ServicesError;
use crate::flashcards::ScaleFlashcards;
use crate::progression::ScaleProgressionQuiz;

/// The study screen currently in front of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Scales,
    Circle,
    Progression,
}

impl View {
    pub const ALL: [View; 3] = [View::Scales, View::Circle, View::Progression];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            View::Scales => "scales",
            View::Circle => "circle",
            View::Progression => "progression",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view `{0}` (expected scales, circle or progression)")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownView(s.to_owned()))
    }
}

/// Assembles the three study engines over one shared progress store.
pub struct StudyServices {
    store: ProgressStore,
    flashcards: ScaleFlashcards,
    circle: CircleOfFifthsTrainer,
    progression: ScaleProgressionQuiz,
    active: View,
}

impl StudyServices {
    /// Build services over `store` with the built-in catalogs.
    #[must_use]
    pub fn new(store: ProgressStore) -> Self {
        Self::with_catalogs(store, default_scales(), default_questions(), Clock::default())
    }

    /// Build services with explicit catalogs and clock.
    #[must_use]
    pub fn with_catalogs(
        store: ProgressStore,
        scales: Vec<Scale>,
        questions: Vec<Question>,
        clock: Clock,
    ) -> Self {
        let flashcards = ScaleFlashcards::new(store.clone(), scales);
        let circle = CircleOfFifthsTrainer::new(store.clone()).with_clock(clock);
        let progression = ScaleProgressionQuiz::new(store.clone(), questions);
        Self {
            store,
            flashcards,
            circle,
            progression,
            active: View::Scales,
        }
    }

    /// Build services backed by a private in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(ProgressStore::new(Arc::new(InMemoryStore::new())))
    }

    /// Build services backed by the `SQLite` database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ServicesError::Sqlite` if the database cannot be opened or migrated.
    pub fn open_sqlite(path: impl AsRef<Path>) -> Result<Self, ServicesError> {
        let store = SqliteStore::open(path)?.into_progress_store();
        Ok(Self::new(store))
    }

    /// Replace the scale catalog and/or question bank from JSON text.
    ///
    /// Both inputs are parsed before either engine is touched, so a failure
    /// leaves the current catalogs in place.
    ///
    /// # Errors
    ///
    /// Returns `ServicesError::Catalog` if either document is malformed or
    /// contains an invalid entry.
    pub fn load_catalogs_from_json(
        &mut self,
        scales: Option<&str>,
        questions: Option<&str>,
    ) -> Result<(), ServicesError> {
        let scales = scales.map(catalog::scales_from_json).transpose()?;
        let questions = questions.map(catalog::questions_from_json).transpose()?;

        if let Some(scales) = scales {
            self.flashcards.set_catalog(scales);
        }
        if let Some(questions) = questions {
            self.progression.set_catalog(questions);
        }
        let active = self.active;
        self.switch_view(active);
        Ok(())
    }

    /// Make `view` the active screen, priming its engine if it has nothing to show.
    pub fn switch_view(&mut self, view: View) {
        self.active = view;
        match view {
            View::Scales => {}
            View::Circle => {
                if self.circle.current_question().is_none() {
                    self.circle.generate_question();
                }
            }
            View::Progression => {
                if self.progression.current().is_none() && !self.progression.is_complete() {
                    self.progression.next_question();
                }
            }
        }
        debug!(%view, "view switched");
    }

    #[must_use]
    pub fn active_view(&self) -> View {
        self.active
    }

    /// Clear every stored namespace and rebuild the engines over the current
    /// catalogs.
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        let scales = self.flashcards.catalog().to_vec();
        let questions = self.progression.catalog().to_vec();
        let clock = self.circle.clock();

        self.flashcards = ScaleFlashcards::new(self.store.clone(), scales);
        self.circle = CircleOfFifthsTrainer::new(self.store.clone()).with_clock(clock);
        self.progression = ScaleProgressionQuiz::new(self.store.clone(), questions);
        info!("all study progress reset");

        let active = self.active;
        self.switch_view(active);
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    #[must_use]
    pub fn flashcards(&self) -> &ScaleFlashcards {
        &self.flashcards
    }

    pub fn flashcards_mut(&mut self) -> &mut ScaleFlashcards {
        &mut self.flashcards
    }

    #[must_use]
    pub fn circle(&self) -> &CircleOfFifthsTrainer {
        &self.circle
    }

    pub fn circle_mut(&mut self) -> &mut CircleOfFifthsTrainer {
        &mut self.circle
    }

    #[must_use]
    pub fn progression(&self) -> &ScaleProgressionQuiz {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut ScaleProgressionQuiz {
        &mut self.progression
    }
}
