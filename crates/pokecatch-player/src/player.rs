//! Player records.
//!
//! A player is the room's record of one person taking part in a run. It
//! tracks:
//! - WHO they are (`PlayerId`, display name)
//! - WHAT part they play (leader or participant)
//! - WHETHER they have taken their catch attempt yet

use rand::Rng;
use serde::{Deserialize, Serialize};

use pokecatch_types::PlayerId;

use crate::{CatchOdds, Catchable, PlayerError};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// What part a player plays in a room.
///
/// The leader is the player who created the room and always sits at
/// index 0 of the roster. There is no behavioral difference when
/// catching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Leader,
    Participant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leader => write!(f, "leader"),
            Self::Participant => write!(f, "participant"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A single player in a room.
///
/// Fields are private: the name is validated once at construction and
/// `has_played` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    role: Role,
    has_played: bool,
}

impl Player {
    /// Creates a participant.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    /// Returns [`PlayerError::InvalidName`] if `name` is empty or only
    /// whitespace.
    pub fn new(id: PlayerId, name: &str) -> Result<Self, PlayerError> {
        Self::with_role(id, name, Role::Participant)
    }

    /// Creates the room leader and announces it.
    ///
    /// Same validation as [`Player::new`].
    pub fn leader(id: PlayerId, name: &str) -> Result<Self, PlayerError> {
        let player = Self::with_role(id, name, Role::Leader)?;
        tracing::info!(
            player_id = %player.id,
            player = %player.name,
            "{} is the room leader",
            player.name
        );
        Ok(player)
    }

    fn with_role(id: PlayerId, name: &str, role: Role) -> Result<Self, PlayerError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PlayerError::InvalidName(name.to_string()));
        }
        Ok(Self {
            id,
            name: trimmed.to_string(),
            role,
            has_played: false,
        })
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_leader(&self) -> bool {
        self.role == Role::Leader
    }

    pub fn has_played(&self) -> bool {
        self.has_played
    }

    /// Flags the player as having taken their catch attempt. Idempotent.
    pub fn mark_as_played(&mut self) {
        self.has_played = true;
    }

    /// Flips the catch coin and reports the outcome.
    ///
    /// Does not touch `has_played`; the mission does that after
    /// recording the result.
    pub fn catch_pokemon<R: Rng>(&self, pokemon: &str, odds: CatchOdds, rng: &mut R) -> bool {
        let caught = odds.roll(rng);
        if caught {
            tracing::info!(player = %self.name, %pokemon, "{} caught {}!", self.name, pokemon);
        } else {
            tracing::info!(player = %self.name, %pokemon, "{} got away from {}", pokemon, self.name);
        }
        caught
    }
}

impl Catchable for Player {
    fn id(&self) -> &PlayerId {
        Player::id(self)
    }

    fn name(&self) -> &str {
        Player::name(self)
    }

    fn catch_pokemon<R: Rng>(&self, pokemon: &str, odds: CatchOdds, rng: &mut R) -> bool {
        Player::catch_pokemon(self, pokemon, odds, rng)
    }

    fn mark_as_played(&mut self) {
        Player::mark_as_played(self)
    }

    fn has_played(&self) -> bool {
        Player::has_played(self)
    }
}
