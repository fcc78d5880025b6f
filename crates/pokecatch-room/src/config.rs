//! Room configuration and state machine.

use std::time::Duration;

use pokecatch_player::CatchOdds;
use serde::{Deserialize, Serialize};

use crate::RoomError;

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration for a room instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Maximum players allowed in the room, leader included. Must be ≥ 1.
    pub max_players: usize,

    /// How long after creation the room accepts joins.
    pub join_window: Duration,

    /// How long the mission runs before catches are resolved.
    pub mission_duration: Duration,

    /// Success probability of each catch attempt.
    pub catch_odds: CatchOdds,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_players: 3,
            join_window: Duration::from_secs(5),
            mission_duration: Duration::from_secs(10),
            catch_odds: CatchOdds::COIN_FLIP,
        }
    }
}

impl RoomConfig {
    /// Default timings with the given capacity.
    pub fn with_max_players(max_players: usize) -> Self {
        Self {
            max_players,
            ..Default::default()
        }
    }

    /// Checks the config before a room is built from it.
    ///
    /// # Errors
    /// Returns [`RoomError::InvalidMaxPlayers`] if `max_players` is 0.
    pub fn validate(&self) -> Result<(), RoomError> {
        if self.max_players < 1 {
            return Err(RoomError::InvalidMaxPlayers(self.max_players));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RoomPhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a room.
///
/// Transitions are strictly ordered, no skipping:
///
/// ```text
/// Open → Closed → MissionRunning → Ended
/// ```
///
/// - **Open**: accepting joins until the join deadline.
/// - **Closed**: join window over, roster frozen. The mission starts
///   immediately after.
/// - **MissionRunning**: mission timer is counting down. Catches are
///   resolved when it fires; the phase holds until the room ends.
/// - **Ended**: terminal. The room is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomPhase {
    Open,
    Closed,
    MissionRunning,
    Ended,
}

impl RoomPhase {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` once the room has reached its terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// The phase that follows this one, or `None` for `Ended`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::Closed),
            Self::Closed => Some(Self::MissionRunning),
            Self::MissionRunning => Some(Self::Ended),
            Self::Ended => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
            Self::MissionRunning => write!(f, "MissionRunning"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_phase_next_follows_strict_order() {
        assert_eq!(RoomPhase::Open.next(), Some(RoomPhase::Closed));
        assert_eq!(RoomPhase::Closed.next(), Some(RoomPhase::MissionRunning));
        assert_eq!(RoomPhase::MissionRunning.next(), Some(RoomPhase::Ended));
        assert_eq!(RoomPhase::Ended.next(), None);
    }

    #[test]
    fn test_room_phase_can_transition_to() {
        assert!(RoomPhase::Open.can_transition_to(RoomPhase::Closed));
        assert!(!RoomPhase::Open.can_transition_to(RoomPhase::MissionRunning));
        assert!(!RoomPhase::Ended.can_transition_to(RoomPhase::Open));
    }

    #[test]
    fn test_room_phase_only_open_is_joinable() {
        assert!(RoomPhase::Open.is_joinable());
        assert!(!RoomPhase::Closed.is_joinable());
        assert!(!RoomPhase::MissionRunning.is_joinable());
        assert!(!RoomPhase::Ended.is_joinable());
    }

    #[test]
    fn test_room_phase_display() {
        assert_eq!(RoomPhase::MissionRunning.to_string(), "MissionRunning");
        assert_eq!(RoomPhase::Ended.to_string(), "Ended");
    }

    #[test]
    fn test_room_config_default() {
        let config = RoomConfig::default();
        assert_eq!(config.max_players, 3);
        assert_eq!(config.join_window, Duration::from_secs(5));
        assert_eq!(config.mission_duration, Duration::from_secs(10));
        assert_eq!(config.catch_odds, CatchOdds::COIN_FLIP);
    }

    #[test]
    fn test_room_config_validate_rejects_zero_capacity() {
        assert!(RoomConfig::with_max_players(1).validate().is_ok());
        assert_eq!(
            RoomConfig::with_max_players(0).validate(),
            Err(RoomError::InvalidMaxPlayers(0))
        );
    }
}
