//! Codec trait and implementations for encoding run reports.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The driver doesn't care HOW a report is serialized; it only needs
//! something that implements [`Codec`]. Currently we provide
//! [`JsonCodec`], which the binary uses for `--json` output.

use serde::{Serialize, de::DeserializeOwned};

use crate::TypesError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `decode` takes `DeserializeOwned` so the result never borrows from
/// the input buffer.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `TypesError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, TypesError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `TypesError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, TypesError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Compact by default; [`JsonCodec::pretty`] indents the output for
/// reading in a terminal. Decoding accepts either form.
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use pokecatch_types::{Codec, JsonCodec, SimTime};
///
/// let codec = JsonCodec::default();
/// let bytes = codec.encode(&SimTime::from_millis(5000)).unwrap();
/// assert_eq!(bytes, b"5000");
///
/// let decoded: SimTime = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, SimTime::from_millis(5000));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

#[cfg(feature = "json")]
impl JsonCodec {
    /// A codec that writes indented, multi-line JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, TypesError> {
        if self.pretty {
            serde_json::to_vec_pretty(value).map_err(TypesError::Encode)
        } else {
            serde_json::to_vec(value).map_err(TypesError::Encode)
        }
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, TypesError> {
        serde_json::from_slice(data).map_err(TypesError::Decode)
    }
}
