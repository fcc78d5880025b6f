//! Shared vocabulary for Pokecatch.
//!
//! This crate defines the types every other layer agrees on:
//!
//! - **Identity** ([`PlayerId`], [`RoomId`], [`MissionId`]) and the
//!   [`IdGenerator`] that mints them.
//! - **Time** ([`SimTime`]): milliseconds since the run started. The
//!   scheduler advances it; rooms and missions only ever read it.
//! - **Reports** ([`RoomSummary`], [`RunReport`], [`CatchRecord`]):
//!   the serializable outcome of one run.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how reports are
//!   turned into bytes.
//!
//! ```text
//! Scheduler (SimTime) → Room / Mission (ids, summaries) → Driver (RunReport)
//! ```

mod codec;
mod error;
mod id;
mod report;
mod time;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::TypesError;
pub use id::{IdGenerator, MissionId, PlayerId, RoomId};
pub use report::{CatchRecord, RoomSummary, RunReport};
pub use time::SimTime;
