//! Room lifecycle for Pokecatch.
//!
//! A room owns its leader, a roster capped at `max_players`, a join
//! window, and one mission to catch a single Pokemon. Rooms are plain
//! values: they never touch a clock or a timer. The caller passes the
//! current time into every operation and schedules the follow-up events
//! that [`Room::apply`] returns.
//!
//! # Key types
//!
//! - [`Room`]: roster, join rules, phase transitions
//! - [`RoomEvent`] / [`Step`] / [`Outcome`]: the event-driven interface
//! - [`RoomPhase`]: lifecycle state machine
//! - [`RoomConfig`]: capacity, join window, mission duration, catch odds
//! - [`Mission`]: timed catch attempt, guarded start/end
//! - [`Pokemon`]: the mission's target

mod config;
mod error;
mod mission;
mod pokemon;
mod room;
mod transition;

pub use config::{RoomConfig, RoomPhase};
pub use error::{MissionError, RoomError};
pub use mission::Mission;
pub use pokemon::{DEFAULT_LOCATION, Pokemon, WILD_POKEMON};
pub use room::{Room, RoomInfo};
pub use transition::{Outcome, RoomEvent, Step};
