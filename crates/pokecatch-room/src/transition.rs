//! Room lifecycle as explicit events.
//!
//! [`Room::apply`] is the single entry point a scheduler loop uses: it
//! takes the room by value, applies one [`RoomEvent`], and hands back a
//! [`Step`] with the updated room, what happened, and which follow-up
//! events to schedule. The chain a run goes through is:
//!
//! ```text
//! CloseJoins ──(0s)──→ StartMission ──(mission duration)──→ EndMission ──(0s)──→ EndRoom
//! ```
//!
//! Rejected events leave the room unchanged and schedule nothing.

use std::time::Duration;

use pokecatch_player::Player;
use pokecatch_types::{CatchRecord, SimTime};
use rand::Rng;

use crate::{Room, RoomError};

/// Something that can happen to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// A player asks to join.
    Join(Player),
    /// The join window elapsed.
    CloseJoins,
    /// Start the mission clock.
    StartMission,
    /// The mission timer fired; resolve the catches.
    EndMission,
    /// Wrap up the room.
    EndRoom,
}

impl RoomEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::CloseJoins => "close_joins",
            Self::StartMission => "start_mission",
            Self::EndMission => "end_mission",
            Self::EndRoom => "end_room",
        }
    }
}

/// What applying an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Joined { player: String, roster_size: usize },
    JoinsClosed { roster_size: usize },
    MissionStarted { ends_at: SimTime },
    MissionEnded { results: Vec<CatchRecord> },
    RoomEnded,
    /// The event was refused; the room is unchanged.
    Rejected(RoomError),
}

/// The result of [`Room::apply`].
#[derive(Debug, Clone)]
pub struct Step {
    /// The room after the event.
    pub room: Room,
    pub outcome: Outcome,
    /// Events to schedule, each after the paired delay from now.
    pub follow_ups: Vec<(Duration, RoomEvent)>,
}

impl Step {
    fn settled(room: Room, outcome: Outcome) -> Self {
        Self {
            room,
            outcome,
            follow_ups: Vec::new(),
        }
    }

    fn then(mut self, delay: Duration, event: RoomEvent) -> Self {
        self.follow_ups.push((delay, event));
        self
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, Outcome::Rejected(_))
    }
}

impl Room {
    /// Applies one event at time `now`.
    ///
    /// Never fails: a refused event comes back as
    /// [`Outcome::Rejected`] with the room untouched.
    pub fn apply<R: Rng>(mut self, event: RoomEvent, now: SimTime, rng: &mut R) -> Step {
        tracing::trace!(room_id = %self.id(), event = event.kind(), %now, "applying room event");

        match event {
            RoomEvent::Join(player) => {
                let name = player.name().to_string();
                match self.join(player, now) {
                    Ok(roster_size) => Step::settled(
                        self,
                        Outcome::Joined {
                            player: name,
                            roster_size,
                        },
                    ),
                    Err(err) => Step::settled(self, Outcome::Rejected(err)),
                }
            }
            RoomEvent::CloseJoins => match self.close_joins(now) {
                Ok(()) => {
                    let roster_size = self.roster_size();
                    Step::settled(self, Outcome::JoinsClosed { roster_size })
                        .then(Duration::ZERO, RoomEvent::StartMission)
                }
                Err(err) => rejected(self, err),
            },
            RoomEvent::StartMission => match self.start_mission(now) {
                Ok(duration) => Step::settled(
                    self,
                    Outcome::MissionStarted {
                        ends_at: now + duration,
                    },
                )
                .then(duration, RoomEvent::EndMission),
                Err(err) => rejected(self, err),
            },
            RoomEvent::EndMission => {
                let resolved = self.end_mission(now, rng).map(<[CatchRecord]>::to_vec);
                match resolved {
                    Ok(results) => Step::settled(self, Outcome::MissionEnded { results })
                        .then(Duration::ZERO, RoomEvent::EndRoom),
                    Err(err) => rejected(self, err),
                }
            }
            RoomEvent::EndRoom => match self.end_room(now) {
                Ok(()) => Step::settled(self, Outcome::RoomEnded),
                Err(err) => rejected(self, err),
            },
        }
    }
}

/// Lifecycle events arrive from the room's own timers, so a refusal
/// points at a scheduling bug rather than user input.
fn rejected(room: Room, err: RoomError) -> Step {
    tracing::warn!(room_id = %room.id(), phase = %room.phase(), error = %err, "room event rejected");
    Step::settled(room, Outcome::Rejected(err))
}
