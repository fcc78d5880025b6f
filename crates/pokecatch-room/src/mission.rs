//! Missions: one timed catch attempt per player.
//!
//! A mission is created with its room, started once when the join window
//! closes, and ended once when its timer fires. Both transitions are
//! guarded: a second `start` or an `end` out of order is an error rather
//! than a silent reset.

use std::time::Duration;

use pokecatch_player::{CatchOdds, Catchable};
use pokecatch_types::{CatchRecord, MissionId, PlayerId, SimTime};
use rand::Rng;

use crate::{MissionError, Pokemon};

/// A timed event during which every player attempts to catch one Pokemon.
#[derive(Debug, Clone)]
pub struct Mission {
    id: MissionId,
    pokemon: Pokemon,
    duration: Duration,
    start_time: Option<SimTime>,
    end_time: Option<SimTime>,
    /// Set when `end` resolves the catches.
    resolved_at: Option<SimTime>,
    /// Catch outcomes in roster order, one per player.
    results: Vec<CatchRecord>,
}

impl Mission {
    pub fn new(id: MissionId, pokemon: Pokemon, duration: Duration) -> Self {
        Self {
            id,
            pokemon,
            duration,
            start_time: None,
            end_time: None,
            resolved_at: None,
            results: Vec::new(),
        }
    }

    pub fn id(&self) -> &MissionId {
        &self.id
    }

    pub fn pokemon(&self) -> &Pokemon {
        &self.pokemon
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start_time(&self) -> Option<SimTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<SimTime> {
        self.end_time
    }

    /// When the catches were resolved, if they have been.
    pub fn resolved_at(&self) -> Option<SimTime> {
        self.resolved_at
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_ended(&self) -> bool {
        self.resolved_at.is_some()
    }

    /// `true` while the mission clock is running: started, and `now` is
    /// before the scheduled end time.
    pub fn is_active(&self, now: SimTime) -> bool {
        match (self.start_time, self.end_time) {
            (Some(_), Some(end)) => now < end,
            _ => false,
        }
    }

    /// Starts the mission clock. Returns the scheduled end time.
    ///
    /// # Errors
    /// Returns [`MissionError::AlreadyStarted`] on a second call; the
    /// original timestamps are kept.
    pub fn start(&mut self, now: SimTime) -> Result<SimTime, MissionError> {
        if self.is_started() {
            return Err(MissionError::AlreadyStarted(self.id.clone()));
        }
        let end = now + self.duration;
        self.start_time = Some(now);
        self.end_time = Some(end);
        tracing::info!(
            mission_id = %self.id,
            pokemon = %self.pokemon.name(),
            location = %self.pokemon.location(),
            ends_at = %end,
            "mission started: catch {} at {}!",
            self.pokemon.name(),
            self.pokemon.location()
        );
        Ok(end)
    }

    /// Resolves the mission for `players`.
    ///
    /// Each player, in slice order, attempts the catch; the outcome is
    /// recorded under their id and they are marked as played. Returns
    /// the recorded results.
    ///
    /// # Errors
    /// Returns [`MissionError::NotStarted`] before [`start`](Self::start)
    /// and [`MissionError::AlreadyEnded`] on a second call.
    pub fn end<C, R>(
        &mut self,
        players: &mut [C],
        odds: CatchOdds,
        now: SimTime,
        rng: &mut R,
    ) -> Result<&[CatchRecord], MissionError>
    where
        C: Catchable,
        R: Rng,
    {
        if !self.is_started() {
            return Err(MissionError::NotStarted(self.id.clone()));
        }
        if self.is_ended() {
            return Err(MissionError::AlreadyEnded(self.id.clone()));
        }

        let pokemon = self.pokemon.name();
        let mut results = Vec::with_capacity(players.len());
        for player in players.iter_mut() {
            let caught = player.catch_pokemon(pokemon, odds, rng);
            results.push(CatchRecord {
                player_id: player.id().clone(),
                player_name: player.name().to_string(),
                caught,
            });
            player.mark_as_played();
        }
        self.results = results;
        self.resolved_at = Some(now);

        tracing::info!(
            mission_id = %self.id,
            players = self.results.len(),
            caught = self.catch_count(),
            "mission ended"
        );
        Ok(&self.results)
    }

    /// Catch outcomes in roster order. Empty until the mission ends.
    pub fn results(&self) -> &[CatchRecord] {
        &self.results
    }

    /// The recorded outcome for one player, if they took part.
    pub fn result_for(&self, player: &PlayerId) -> Option<bool> {
        self.results
            .iter()
            .find(|r| &r.player_id == player)
            .map(|r| r.caught)
    }

    /// How many players caught the Pokemon.
    pub fn catch_count(&self) -> usize {
        self.results.iter().filter(|r| r.caught).count()
    }
}
