//! Error types for the room layer.

use pokecatch_types::{MissionId, RoomId, SimTime};

use crate::RoomPhase;

/// Errors that can occur during room operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// `max_players` was below 1.
    #[error("max players must be at least 1, got {0}")]
    InvalidMaxPlayers(usize),

    /// The Pokemon's name or location was empty.
    #[error("invalid Pokemon: name {name:?}, location {location:?}")]
    InvalidPokemon { name: String, location: String },

    /// The player handed to `Room::new` was not created as a leader.
    #[error("{0} is not a room leader")]
    NotLeader(String),

    /// A player with this name is already in the room.
    #[error("a player named {name:?} is already in room {room}")]
    DuplicateName { name: String, room: RoomId },

    /// The room is at capacity.
    #[error("room {room} is full ({max} players)")]
    RoomFull { room: RoomId, max: usize },

    /// Joins were closed or the join deadline has passed.
    #[error("room {0} is no longer accepting players")]
    JoinsClosed(RoomId),

    /// Joins can only be closed once the join deadline has been reached.
    #[error("room {room} keeps joins open until {deadline}")]
    JoinWindowOpen { room: RoomId, deadline: SimTime },

    /// The requested phase change skips or reverses the state machine.
    #[error("invalid room transition: {from} → {to}")]
    InvalidTransition { from: RoomPhase, to: RoomPhase },

    /// The room cannot end while its mission is still unresolved.
    #[error("mission {0} has not been resolved yet")]
    MissionUnresolved(MissionId),

    #[error(transparent)]
    Mission(#[from] MissionError),
}

impl RoomError {
    /// Returns `true` for errors caused by bad construction input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaxPlayers(_) | Self::InvalidPokemon { .. } | Self::NotLeader(_)
        )
    }

    /// Returns `true` for the ways `Room::join` turns a player away.
    pub fn is_join_rejection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. } | Self::RoomFull { .. } | Self::JoinsClosed(_)
        )
    }
}

/// Errors from driving a mission out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissionError {
    /// `start` was called on a mission that already started.
    #[error("mission {0} has already started")]
    AlreadyStarted(MissionId),

    /// `end` was called before `start`.
    #[error("mission {0} has not started")]
    NotStarted(MissionId),

    /// `end` was called on a mission that already resolved.
    #[error("mission {0} has already ended")]
    AlreadyEnded(MissionId),
}
