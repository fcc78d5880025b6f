//! Error types for the shared types layer.
//!
//! Each Pokecatch crate defines its own error enum, so a `TypesError`
//! always means a report could not be encoded or decoded, never that a
//! room or player misbehaved.

/// Errors that can occur while encoding or decoding reports.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// Serialization failed (Rust value → bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (bytes → Rust value).
    ///
    /// Common causes: malformed JSON, missing fields, or a report
    /// written by an incompatible version.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// An identifier string was rejected (empty or containing
    /// whitespace).
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}
