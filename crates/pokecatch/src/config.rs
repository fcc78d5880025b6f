//! Simulation configuration.

use std::time::Duration;

use pokecatch_room::{DEFAULT_LOCATION, RoomConfig, WILD_POKEMON};
use serde::{Deserialize, Serialize};

use crate::PokecatchError;

/// Leader display name used when none is given.
pub const DEFAULT_LEADER_NAME: &str = "Leader";

/// Everything that shapes one run.
///
/// Pacing is not part of the config: the same config replays the same
/// run whether it is paced virtually or in real time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Capacity, timings and catch odds for the room.
    pub room: RoomConfig,

    /// Cadence at which new players are synthesized while joins are open.
    pub spawn_interval: Duration,

    /// Seed for the run's RNG. `None` seeds from the OS, so runs differ.
    pub seed: Option<u64>,

    /// Display name of the room leader.
    pub leader_name: String,

    /// Candidates for the mission's target; one is picked at random.
    pub pokemon_pool: Vec<String>,

    /// Where the mission takes place.
    pub location: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            room: RoomConfig::default(),
            spawn_interval: Duration::from_secs(1),
            seed: None,
            leader_name: DEFAULT_LEADER_NAME.to_string(),
            pokemon_pool: WILD_POKEMON.iter().map(|p| p.to_string()).collect(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl SimulationConfig {
    /// Checks every setting before a run is built from it.
    ///
    /// Player names and the Pokemon itself are validated when they are
    /// constructed; this covers what only the driver uses.
    pub fn validate(&self) -> Result<(), PokecatchError> {
        self.room.validate()?;
        if self.spawn_interval.is_zero() {
            return Err(PokecatchError::InvalidConfig(
                "spawn interval must be greater than zero".into(),
            ));
        }
        if self.pokemon_pool.is_empty() {
            return Err(PokecatchError::InvalidConfig(
                "Pokemon pool is empty".into(),
            ));
        }
        Ok(())
    }
}
