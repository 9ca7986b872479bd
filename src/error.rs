//! Error taxonomy for history operations.
//!
//! Every error here is local and recoverable: the caller decides whether to
//! retry with corrected arguments or give up on the operation.

/// Errors produced by edits, delta chains, documents and sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// A position or length falls outside the content it addresses
    OutOfBounds {
        position: usize,
        len: usize,
        content_len: usize,
    },
    /// A byte offset lands inside a multi-byte UTF-8 character
    NotCharBoundary { offset: usize },
    /// A replay index beyond the number of recorded edits
    IndexOutOfRange { requested: usize, available: usize },
    /// A checkpoint id that was never issued or has been popped
    UnknownCheckpoint { id: usize },
    /// No checkpoint left to pop
    EmptyHistory,
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::OutOfBounds {
                position,
                len,
                content_len,
            } => write!(
                f,
                "Out of bounds: range {position}..{} exceeds content length {content_len}",
                position.saturating_add(*len)
            ),
            HistoryError::NotCharBoundary { offset } => {
                write!(f, "Offset {offset} is not on a character boundary")
            }
            HistoryError::IndexOutOfRange {
                requested,
                available,
            } => write!(
                f,
                "Index out of range: requested {requested}, only {available} recorded"
            ),
            HistoryError::UnknownCheckpoint { id } => write!(f, "No checkpoint #{id}"),
            HistoryError::EmptyHistory => write!(f, "History is empty"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Check that `position..position + len` addresses valid text in `content`.
///
/// Both ends must lie within the content and on character boundaries.
pub(crate) fn check_range(content: &str, position: usize, len: usize) -> Result<()> {
    let end = position.checked_add(len).ok_or(HistoryError::OutOfBounds {
        position,
        len,
        content_len: content.len(),
    })?;
    if end > content.len() {
        return Err(HistoryError::OutOfBounds {
            position,
            len,
            content_len: content.len(),
        });
    }
    if !content.is_char_boundary(position) {
        return Err(HistoryError::NotCharBoundary { offset: position });
    }
    if !content.is_char_boundary(end) {
        return Err(HistoryError::NotCharBoundary { offset: end });
    }
    Ok(())
}
