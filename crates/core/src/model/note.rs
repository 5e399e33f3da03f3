//! Note names and the circle of fifths.
//!
//! Notes are plain strings (`"C"`, `"F#"`, `"Bb"`) because catalogs and
//! question content spell them that way. The circle itself is a fixed cycle of
//! twelve sharp-spelled pitch classes ordered by ascending perfect fifths.

/// The twelve pitch classes in circle-of-fifths order (not chromatic order).
pub const CIRCLE_OF_FIFTHS: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#", "F",
];

/// Position of `note` on the circle, if it is one of the twelve spellings.
#[must_use]
pub fn position(note: &str) -> Option<usize> {
    CIRCLE_OF_FIFTHS.iter().position(|candidate| *candidate == note)
}

/// The note a perfect fifth above `note`, wrapping from `F` back to `C`.
///
/// # Examples
///
/// ```
/// # use theory_core::model::note::successor;
/// assert_eq!(successor("C"), Some("G"));
/// assert_eq!(successor("F"), Some("C"));
/// assert_eq!(successor("H"), None);
/// ```
#[must_use]
pub fn successor(note: &str) -> Option<&'static str> {
    let index = position(note)?;
    Some(CIRCLE_OF_FIFTHS[(index + 1) % CIRCLE_OF_FIFTHS.len()])
}

/// The note a perfect fifth below `note`, wrapping from `C` back to `F`.
#[must_use]
pub fn predecessor(note: &str) -> Option<&'static str> {
    let index = position(note)?;
    let len = CIRCLE_OF_FIFTHS.len();
    Some(CIRCLE_OF_FIFTHS[(index + len - 1) % len])
}

/// Replace ASCII accidentals with their typographic symbols (`#` to `♯`, `b` to `♭`).
///
/// Intended for note names only; running it over prose would mangle any
/// lowercase `b`.
#[must_use]
pub fn format_note(note: &str) -> String {
    note.replace('#', "♯").replace('b', "♭")
}
