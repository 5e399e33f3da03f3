mod ids;
pub mod note;
mod progress;
mod question;
mod scale;

pub use ids::{QuestionId, ScaleId};
pub use note::{CIRCLE_OF_FIFTHS, format_note};
pub use progress::{
    CircleProgress, Namespace, ProgressRecord, ProgressionProgress, ScalesProgress, Section,
};
pub use question::{Question, QuestionError};
pub use scale::{Scale, ScaleError};
