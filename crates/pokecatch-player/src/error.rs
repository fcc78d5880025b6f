//! Error types for the player layer.

/// Errors that can occur while creating players.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// The display name was empty or only whitespace.
    ///
    /// Carries the rejected input as given (untrimmed) so the log line
    /// shows exactly what was typed.
    #[error("invalid name: {0:?}")]
    InvalidName(String),
}
