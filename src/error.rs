/// Errors returned when mapping frequencies onto notes.
///
/// Pitch estimation itself never fails: an indeterminate estimate is `None`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Frequencies must be finite and strictly positive.
    #[error("frequency must be finite and positive, got {0}")]
    InvalidFrequency(f64),

    /// The continuous note number does not fit a note index.
    #[error("note number {0} is outside the representable range")]
    NoteOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
