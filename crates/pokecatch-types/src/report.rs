//! Serializable outcome of a run.
//!
//! These are plain data: the room layer fills in a [`RoomSummary`] when
//! it reaches its terminal phase, and the driver wraps it in a
//! [`RunReport`] with the join statistics and the seed that produced it.
//! Two runs with the same seed produce equal reports.

use serde::{Deserialize, Serialize};

use crate::{MissionId, PlayerId, RoomId, SimTime};

/// One player's catch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub caught: bool,
}

/// Snapshot of a room and its mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub mission_id: MissionId,
    /// Display name of the room leader.
    pub leader: String,
    pub pokemon: String,
    pub location: String,
    /// Roster in join order, leader first.
    pub players: Vec<String>,
    pub max_players: usize,
    /// Catch outcomes in roster order. Empty until the mission ends.
    pub results: Vec<CatchRecord>,
    pub created_at: SimTime,
    pub join_deadline: SimTime,
    #[serde(default)]
    pub mission_started_at: Option<SimTime>,
    #[serde(default)]
    pub mission_ended_at: Option<SimTime>,
    #[serde(default)]
    pub ended_at: Option<SimTime>,
}

impl RoomSummary {
    /// Number of players who caught the Pokemon.
    pub fn caught_count(&self) -> usize {
        self.results.iter().filter(|r| r.caught).count()
    }

    /// Names of the players who caught the Pokemon, in roster order.
    pub fn catchers(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.caught)
            .map(|r| r.player_name.as_str())
            .collect()
    }
}

/// Everything one simulation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed the run's RNG was created from, if one was configured.
    pub seed: Option<u64>,
    pub room: RoomSummary,
    /// Synthesized players admitted to the room.
    pub joins_accepted: usize,
    /// Synthesized players the room turned away.
    pub joins_rejected: usize,
    /// Virtual time of the last processed event.
    pub finished_at: SimTime,
}
