//! Players for Pokecatch.
//!
//! This crate owns the people in a room:
//!
//! 1. **Identity**: a [`Player`] record with a generated id and a
//!    validated display name.
//! 2. **Role**: the room creator is a [`Role::Leader`], everyone else a
//!    [`Role::Participant`]. Both share one concrete type.
//! 3. **Catching**: the [`Catchable`] capability a mission drives when
//!    it resolves, with [`CatchOdds`] controlling the coin flip.
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)    ← holds the roster, asks each player to catch
//!     ↕
//! Player Layer (this crate)
//!     ↕
//! Types Layer (below)   ← provides PlayerId
//! ```

mod catch;
mod error;
mod player;

pub use catch::{CatchOdds, Catchable};
pub use error::PlayerError;
pub use player::{Player, Role};
