//! # Pokecatch
//!
//! A timed catch-the-Pokemon room simulation.
//!
//! A leader opens a room, synthesized players join during a short window,
//! and a timed mission then resolves one catch attempt per player. All
//! timing runs through a single virtual-clock scheduler, so a seeded run
//! is fully reproducible and finishes instantly unless real-time pacing
//! is requested.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pokecatch::prelude::*;
//!
//! # async fn demo() -> Result<(), PokecatchError> {
//! let report = Simulation::builder()
//!     .leader_name("Ash")
//!     .max_players(5)
//!     .build()?
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod prompt;
mod simulation;
mod spawner;

pub use config::{DEFAULT_LEADER_NAME, SimulationConfig};
pub use error::PokecatchError;
pub use simulation::{SimEvent, Simulation, SimulationBuilder};
pub use spawner::PlayerSpawner;

pub mod prelude {
    pub use crate::{PokecatchError, Simulation, SimulationBuilder, SimulationConfig};
    pub use pokecatch_player::{CatchOdds, Player, Role};
    pub use pokecatch_room::{RoomConfig, RoomPhase};
    pub use pokecatch_sched::Pacing;
    pub use pokecatch_types::{Codec, JsonCodec, RoomSummary, RunReport, SimTime};
}
