#![forbid(unsafe_code)]

pub mod app_services;
pub mod circle;
pub mod error;
pub mod feedback;
pub mod flashcards;
pub mod progression;
pub mod random;

pub use theory_core::Clock;

pub use app_services::{StudyServices, View};
pub use circle::{AUTO_ADVANCE_DELAY_MS, CircleOfFifthsTrainer, CircleQuestion, CircleView};
pub use error::ServicesError;
pub use feedback::{AnswerFeedback, MarkedOption, OptionMark};
pub use flashcards::{CardFace, FlashcardView, ScaleFlashcards};
pub use progression::{
    ActiveQuestion, NextQuestion, ProgressionView, QuizTally, ScaleProgressionQuiz,
};
