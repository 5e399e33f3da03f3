use storage::ProgressStore;
use theory_core::model::{Scale, ScaleId, ScalesProgress};
use tracing::{debug, info};

use crate::random;

/// Which side of the current card is showing. Display-only; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

impl CardFace {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        }
    }
}

/// Plain data for rendering the current flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardView {
    pub counter: String,
    pub title: String,
    pub notes: String,
    pub face: CardFace,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub shuffle_mode: bool,
    pub completed: bool,
}

/// Steps through the scale catalog one card at a time.
///
/// The working list is either the catalog in order or a shuffled copy of it.
/// Position and shuffle mode are written to the `scales` namespace after every
/// navigation.
pub struct ScaleFlashcards {
    store: ProgressStore,
    catalog: Vec<Scale>,
    cards: Vec<Scale>,
    current_index: usize,
    shuffle_mode: bool,
    face: CardFace,
    completed: Vec<ScaleId>,
}

impl ScaleFlashcards {
    /// Build the navigator, restoring shuffle mode, position and completed
    /// cards from the store.
    ///
    /// A saved position past the end of the catalog is clamped to the last card.
    /// A shuffled order is not persisted, so shuffle mode restores as a fresh
    /// shuffle.
    #[must_use]
    pub fn new(store: ProgressStore, catalog: Vec<Scale>) -> Self {
        let saved = store.section::<ScalesProgress>();
        let mut navigator = Self {
            store,
            catalog,
            cards: Vec::new(),
            current_index: 0,
            shuffle_mode: saved.shuffle_mode,
            face: CardFace::Front,
            completed: saved.completed,
        };
        navigator.cards = navigator.working_list();
        navigator.current_index = saved
            .current_index
            .min(navigator.cards.len().saturating_sub(1));
        navigator
    }

    /// Swap in a new catalog and start over from its first card.
    pub fn set_catalog(&mut self, catalog: Vec<Scale>) {
        info!(cards = catalog.len(), "scale catalog replaced");
        self.catalog = catalog;
        self.rebuild();
    }

    #[must_use]
    pub fn catalog(&self) -> &[Scale] {
        &self.catalog
    }

    /// Flip shuffle mode, rebuild the working list and return to the first card.
    ///
    /// Returns the new shuffle mode.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_mode = !self.shuffle_mode;
        self.rebuild();
        self.shuffle_mode
    }

    /// Move to the next card. Returns `false` (and changes nothing) on the last card.
    pub fn next(&mut self) -> bool {
        if self.current_index + 1 >= self.cards.len() {
            return false;
        }
        self.current_index += 1;
        self.after_move();
        true
    }

    /// Move to the previous card. Returns `false` (and changes nothing) on the first card.
    pub fn previous(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.after_move();
        true
    }

    /// Jump back to the first card without reordering.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.after_move();
    }

    /// Turn the current card over.
    pub fn flip(&mut self) -> CardFace {
        self.face = self.face.flipped();
        self.face
    }

    /// The card under the cursor, or `None` for an empty catalog.
    #[must_use]
    pub fn current_card(&self) -> Option<&Scale> {
        self.cards.get(self.current_index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn shuffle_mode(&self) -> bool {
        self.shuffle_mode
    }

    #[must_use]
    pub fn face(&self) -> CardFace {
        self.face
    }

    /// Record the current card as learned. Returns `true` if it was not already.
    pub fn mark_current_completed(&mut self) -> bool {
        let Some(id) = self.current_card().map(|card| card.id().clone()) else {
            return false;
        };
        if self.completed.contains(&id) {
            return false;
        }
        self.completed.push(id);
        let completed = self.completed.clone();
        self.store
            .update::<ScalesProgress>(|scales| scales.completed = completed);
        true
    }

    #[must_use]
    pub fn is_completed(&self, id: &ScaleId) -> bool {
        self.completed.contains(id)
    }

    #[must_use]
    pub fn completed(&self) -> &[ScaleId] {
        &self.completed
    }

    #[must_use]
    pub fn view(&self) -> Option<FlashcardView> {
        let card = self.current_card()?;
        Some(FlashcardView {
            counter: format!("Card {} of {}", self.current_index + 1, self.cards.len()),
            title: card.display_name(),
            notes: card.notes_line(),
            face: self.face,
            can_go_previous: self.current_index > 0,
            can_go_next: self.current_index + 1 < self.cards.len(),
            shuffle_mode: self.shuffle_mode,
            completed: self.is_completed(card.id()),
        })
    }

    fn working_list(&self) -> Vec<Scale> {
        if self.shuffle_mode {
            random::shuffle(&self.catalog)
        } else {
            self.catalog.clone()
        }
    }

    fn rebuild(&mut self) {
        self.cards = self.working_list();
        self.current_index = 0;
        self.after_move();
    }

    fn after_move(&mut self) {
        self.face = CardFace::Front;
        debug!(
            index = self.current_index,
            shuffle = self.shuffle_mode,
            "flashcard position changed"
        );
        let (current_index, shuffle_mode) = (self.current_index, self.shuffle_mode);
        self.store.update::<ScalesProgress>(|scales| {
            scales.current_index = current_index;
            scales.shuffle_mode = shuffle_mode;
        });
    }
}
