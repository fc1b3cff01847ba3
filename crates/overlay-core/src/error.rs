use thiserror::Error;

/// Errors surfaced by the overlay core. None of these are fatal to the host;
/// callers log them and keep the previous state.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("malformed host message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown gizmo handle: {0}")]
    UnknownHandle(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
