//! Identity types and the identifier generator.
//!
//! Every entity in a run (room, mission, player) gets a string id built
//! from the current [`SimTime`] plus a random suffix. Ids only have to
//! be unique inside one process; nothing ever leaves memory.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{SimTime, TypesError};

/// Length of the random base-36 suffix appended to every id.
const SUFFIX_LEN: u32 = 6;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ---------------------------------------------------------------------------
// Identity newtypes
// ---------------------------------------------------------------------------

/// Declares a string-backed id newtype.
///
/// Each id gets the same surface: a validating `new`, `as_str`,
/// transparent serde, and a `Display` impl with a short type prefix so
/// logs read `P-…` / `R-…` / `M-…`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing id string.
            ///
            /// # Errors
            /// Returns [`TypesError::InvalidId`] if `raw` is empty or
            /// contains whitespace.
            pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
                let raw = raw.into();
                if raw.is_empty() || raw.chars().any(char::is_whitespace) {
                    return Err(TypesError::InvalidId(raw));
                }
                Ok(Self(raw))
            }

            /// The raw id string, without the display prefix.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

string_id!(
    /// A unique identifier for a player (leader or participant).
    ///
    /// Mission results are keyed by this id, so two players with the
    /// same display name would still get separate entries; the room
    /// rejects duplicate names before that can happen.
    PlayerId,
    "P"
);

string_id!(
    /// A unique identifier for a room.
    RoomId,
    "R"
);

string_id!(
    /// A unique identifier for a mission.
    MissionId,
    "M"
);

// ---------------------------------------------------------------------------
// IdGenerator
// ---------------------------------------------------------------------------

/// Mints process-unique id strings.
///
/// Format: `<time base36>-<sequence base36>-<suffix>` where `time` is
/// the supplied [`SimTime`] in milliseconds, `sequence` counts ids issued
/// by this generator, and `suffix` is six random base-36 digits drawn
/// from the caller's RNG. With a seeded RNG and a virtual clock the
/// output is fully reproducible.
///
/// The sequence number makes ids from one generator unique even when
/// two are minted in the same millisecond with the same suffix. There is
/// no guarantee across generators or processes.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: u64,
}

impl IdGenerator {
    /// Creates a generator that has issued no ids yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Returns the next raw id string.
    pub fn next_id<R: Rng>(&mut self, now: SimTime, rng: &mut R) -> String {
        self.issued += 1;
        let suffix = rng.random_range(0..36u64.pow(SUFFIX_LEN));
        format!(
            "{}-{}-{:0>width$}",
            to_base36(now.as_millis()),
            to_base36(self.issued),
            to_base36(suffix),
            width = SUFFIX_LEN as usize,
        )
    }

    /// Mints a [`PlayerId`].
    pub fn player_id<R: Rng>(&mut self, now: SimTime, rng: &mut R) -> PlayerId {
        PlayerId(self.next_id(now, rng))
    }

    /// Mints a [`RoomId`].
    pub fn room_id<R: Rng>(&mut self, now: SimTime, rng: &mut R) -> RoomId {
        RoomId(self.next_id(now, rng))
    }

    /// Mints a [`MissionId`].
    pub fn mission_id<R: Rng>(&mut self, now: SimTime, rng: &mut R) -> MissionId {
        MissionId(self.next_id(now, rng))
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    // Only ASCII digits and lowercase letters were pushed.
    String::from_utf8(digits).unwrap_or_default()
}
