//! The room: a leader, a roster, a join window and one mission.
//!
//! A room never reads the clock or schedules anything itself. Every
//! operation takes the current [`SimTime`] from the caller, and the
//! timers a transition needs are returned to the caller (see
//! [`Room::apply`](crate::Room::apply)) so one scheduler loop drives the
//! whole lifecycle.

use std::time::Duration;

use pokecatch_player::Player;
use pokecatch_types::{CatchRecord, IdGenerator, RoomId, RoomSummary, SimTime};
use rand::Rng;

use crate::{Mission, Pokemon, RoomConfig, RoomError, RoomEvent, RoomPhase};

/// A snapshot of room metadata (not the roster itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub phase: RoomPhase,
    pub player_count: usize,
    pub max_players: usize,
}

/// A single game room.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    config: RoomConfig,
    phase: RoomPhase,
    /// Join order; the leader is always at index 0.
    players: Vec<Player>,
    mission: Mission,
    created_at: SimTime,
    join_deadline: SimTime,
    is_join_open: bool,
    ended_at: Option<SimTime>,
}

impl Room {
    /// Creates a room led by `leader`, with a mission to catch `pokemon`.
    ///
    /// The roster starts as just the leader. The join window closes at
    /// `now + config.join_window`; the caller schedules that from
    /// [`initial_timers`](Self::initial_timers).
    ///
    /// # Errors
    /// - [`RoomError::InvalidMaxPlayers`] if `config.max_players` is 0.
    /// - [`RoomError::NotLeader`] if `leader` was created as a participant.
    pub fn new<R: Rng>(
        leader: Player,
        pokemon: Pokemon,
        config: RoomConfig,
        now: SimTime,
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Result<Self, RoomError> {
        config.validate()?;
        if !leader.is_leader() {
            return Err(RoomError::NotLeader(leader.name().to_string()));
        }

        let id = ids.room_id(now, rng);
        let mission = Mission::new(ids.mission_id(now, rng), pokemon, config.mission_duration);
        let join_deadline = now + config.join_window;

        tracing::info!(
            room_id = %id,
            leader = %leader.name(),
            max_players = config.max_players,
            %join_deadline,
            "room created by {}",
            leader.name()
        );

        let players = vec![leader];

        Ok(Self {
            id,
            config,
            phase: RoomPhase::Open,
            players,
            mission,
            created_at: now,
            join_deadline,
            is_join_open: true,
            ended_at: None,
        })
    }

    /// Timers the owner must schedule right after construction.
    pub fn initial_timers(&self) -> Vec<(Duration, RoomEvent)> {
        vec![(self.config.join_window, RoomEvent::CloseJoins)]
    }

    // -- Accessors -------------------------------------------------------

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    /// The roster in join order, leader first.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn leader(&self) -> &Player {
        // Construction seeds the roster with the leader and nothing
        // removes players.
        &self.players[0]
    }

    pub fn roster_size(&self) -> usize {
        self.players.len()
    }

    pub fn max_players(&self) -> usize {
        self.config.max_players
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.config.max_players
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn created_at(&self) -> SimTime {
        self.created_at
    }

    pub fn join_deadline(&self) -> SimTime {
        self.join_deadline
    }

    pub fn is_join_open(&self) -> bool {
        self.is_join_open
    }

    /// `true` if a join at `now` would pass the window check: the phase
    /// is joinable, joins are still open and the deadline hasn't been
    /// reached.
    pub fn accepts_joins_at(&self, now: SimTime) -> bool {
        self.phase.is_joinable() && self.is_join_open && now < self.join_deadline
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn ended_at(&self) -> Option<SimTime> {
        self.ended_at
    }

    // -- Operations ------------------------------------------------------

    /// Adds `player` to the roster. Returns the new roster size.
    ///
    /// Rejections are logged and returned; the room is unchanged.
    ///
    /// # Errors
    /// - [`RoomError::DuplicateName`] if the name is already taken.
    /// - [`RoomError::RoomFull`] if the roster is at capacity.
    /// - [`RoomError::JoinsClosed`] if joins were closed or `now` is at or
    ///   past the join deadline.
    pub fn join(&mut self, player: Player, now: SimTime) -> Result<usize, RoomError> {
        if let Err(err) = self.check_join(&player, now) {
            tracing::warn!(
                room_id = %self.id,
                player = %player.name(),
                reason = %err,
                "join rejected"
            );
            return Err(err);
        }

        tracing::info!(
            room_id = %self.id,
            player = %player.name(),
            players = self.players.len() + 1,
            max_players = self.config.max_players,
            "{} joined the room ({}/{})",
            player.name(),
            self.players.len() + 1,
            self.config.max_players
        );
        self.players.push(player);
        Ok(self.players.len())
    }

    fn check_join(&self, player: &Player, now: SimTime) -> Result<(), RoomError> {
        if self.players.iter().any(|p| p.name() == player.name()) {
            return Err(RoomError::DuplicateName {
                name: player.name().to_string(),
                room: self.id.clone(),
            });
        }
        if self.is_full() {
            return Err(RoomError::RoomFull {
                room: self.id.clone(),
                max: self.config.max_players,
            });
        }
        if !self.accepts_joins_at(now) {
            return Err(RoomError::JoinsClosed(self.id.clone()));
        }
        Ok(())
    }

    /// Closes the join window. One-way: `Open → Closed`.
    ///
    /// # Errors
    /// - [`RoomError::JoinWindowOpen`] before the join deadline.
    /// - [`RoomError::InvalidTransition`] if joins are already closed.
    pub fn close_joins(&mut self, now: SimTime) -> Result<(), RoomError> {
        self.check_advance(RoomPhase::Closed)?;
        if now < self.join_deadline {
            return Err(RoomError::JoinWindowOpen {
                room: self.id.clone(),
                deadline: self.join_deadline,
            });
        }
        self.phase = RoomPhase::Closed;
        self.is_join_open = false;
        tracing::info!(
            room_id = %self.id,
            players = self.players.len(),
            at = %now,
            "joins closed with {} player(s)",
            self.players.len()
        );
        Ok(())
    }

    /// Starts the mission: `Closed → MissionRunning`. Returns how long
    /// until the mission should be resolved.
    pub fn start_mission(&mut self, now: SimTime) -> Result<Duration, RoomError> {
        self.check_advance(RoomPhase::MissionRunning)?;
        self.mission.start(now)?;
        self.phase = RoomPhase::MissionRunning;
        Ok(self.mission.duration())
    }

    /// Resolves the mission for the current roster.
    pub fn end_mission<R: Rng>(
        &mut self,
        now: SimTime,
        rng: &mut R,
    ) -> Result<&[CatchRecord], RoomError> {
        if self.phase != RoomPhase::MissionRunning {
            return Err(RoomError::InvalidTransition {
                from: self.phase,
                to: RoomPhase::MissionRunning,
            });
        }
        let odds = self.config.catch_odds;
        Ok(self.mission.end(&mut self.players, odds, now, rng)?)
    }

    /// Terminal transition: `MissionRunning → Ended`. Requires the
    /// mission to have been resolved.
    pub fn end_room(&mut self, now: SimTime) -> Result<(), RoomError> {
        self.check_advance(RoomPhase::Ended)?;
        if !self.mission.is_ended() {
            return Err(RoomError::MissionUnresolved(self.mission.id().clone()));
        }
        self.phase = RoomPhase::Ended;
        self.ended_at = Some(now);
        tracing::info!(
            room_id = %self.id,
            caught = self.mission.catch_count(),
            players = self.players.len(),
            "room ended"
        );
        Ok(())
    }

    fn check_advance(&self, to: RoomPhase) -> Result<(), RoomError> {
        if self.phase.can_transition_to(to) {
            Ok(())
        } else {
            Err(RoomError::InvalidTransition {
                from: self.phase,
                to,
            })
        }
    }

    // -- Snapshots -------------------------------------------------------

    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.id.clone(),
            phase: self.phase,
            player_count: self.players.len(),
            max_players: self.config.max_players,
        }
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.id.clone(),
            mission_id: self.mission.id().clone(),
            leader: self.leader().name().to_string(),
            pokemon: self.mission.pokemon().name().to_string(),
            location: self.mission.pokemon().location().to_string(),
            players: self.players.iter().map(|p| p.name().to_string()).collect(),
            max_players: self.config.max_players,
            results: self.mission.results().to_vec(),
            created_at: self.created_at,
            join_deadline: self.join_deadline,
            mission_started_at: self.mission.start_time(),
            mission_ended_at: self.mission.resolved_at(),
            ended_at: self.ended_at,
        }
    }
}
