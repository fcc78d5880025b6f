//! Unified error type for Pokecatch.

use pokecatch_player::PlayerError;
use pokecatch_room::RoomError;
use pokecatch_types::{SimTime, TypesError};

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each wrapped variant generates the `From`
/// impl, so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PokecatchError {
    /// Ids, timestamps or report encoding.
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Player construction (empty name).
    #[error(transparent)]
    Player(#[from] PlayerError),

    /// Room, mission or Pokemon errors.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A simulation setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading the leader name from the terminal failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The scheduler ran dry (or hit its event limit) before the room
    /// ended.
    #[error("simulation stalled at {at} before the room ended")]
    Stalled { at: SimTime },
}

impl PokecatchError {
    /// `true` for errors caused by bad input rather than by the run.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Player(_) | Self::InvalidConfig(_) => true,
            Self::Room(err) => err.is_validation(),
            Self::Types(err) => matches!(err, TypesError::InvalidId(_)),
            Self::Io(_) | Self::Stalled { .. } => false,
        }
    }
}
