//! `Simulation` builder and run loop.
//!
//! This is the entry point for running a Pokecatch game. It ties together
//! all the layers: scheduler → room → mission → players.

use std::time::Duration;

use pokecatch_player::Player;
use pokecatch_room::{Outcome, Pokemon, Room, RoomEvent, Step};
use pokecatch_sched::{Pacing, Scheduler, SchedulerConfig};
use pokecatch_types::{IdGenerator, RunReport, SimTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::spawner::PlayerSpawner;
use crate::{PokecatchError, SimulationConfig};

/// Everything the run's scheduler can fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// A room lifecycle event.
    Room(RoomEvent),
    /// Time to synthesize the next player.
    SpawnTick,
}

/// Builder for configuring a simulation run.
///
/// # Example
///
/// ```rust,no_run
/// use pokecatch::prelude::*;
///
/// # async fn demo() -> Result<(), PokecatchError> {
/// let report = Simulation::builder()
///     .max_players(5)
///     .leader_name("Ash")
///     .seed(7)
///     .build()?
///     .run()
///     .await?;
/// println!("{} caught it", report.room.caught_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
    scheduler: SchedulerConfig,
}

impl SimulationBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole simulation configuration.
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_players(mut self, max_players: usize) -> Self {
        self.config.room.max_players = max_players;
        self
    }

    pub fn leader_name(mut self, name: impl Into<String>) -> Self {
        self.config.leader_name = name.into();
        self
    }

    /// Makes the run reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn spawn_interval(mut self, interval: Duration) -> Self {
        self.config.spawn_interval = interval;
        self
    }

    /// Virtual (instant) or real-time pacing. Defaults to virtual.
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.scheduler.pacing = pacing;
        self
    }

    /// Caps how many events the run may process. 0 = unlimited.
    pub fn event_limit(mut self, limit: u64) -> Self {
        self.scheduler.event_limit = limit;
        self
    }

    /// Validates the configuration and prepares the run.
    ///
    /// # Errors
    /// Any [`SimulationConfig::validate`] failure.
    pub fn build(self) -> Result<Simulation, PokecatchError> {
        self.config.validate()?;

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Simulation {
            scheduler: Scheduler::new(self.scheduler),
            config: self.config,
            ids: IdGenerator::new(),
            rng,
        })
    }
}

/// A single prepared run.
///
/// Call [`run()`](Self::run) to play it out.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    scheduler: Scheduler<SimEvent>,
    ids: IdGenerator,
    rng: StdRng,
}

impl Simulation {
    /// Creates a new builder.
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn pacing(&self) -> Pacing {
        self.scheduler.pacing()
    }

    /// Runs the room from creation to its end.
    ///
    /// Creates the leader and the room, synthesizes players on the spawn
    /// cadence while joins are open, and lets the room's own timers carry
    /// it through the mission. Rejected joins are logged and counted, and
    /// the run continues.
    ///
    /// # Errors
    /// - Validation errors from the leader name or the Pokemon.
    /// - [`PokecatchError::Stalled`] if the scheduler stops before the
    ///   room ends.
    pub async fn run(mut self) -> Result<RunReport, PokecatchError> {
        let mut room = self.open_room()?;
        let mut spawner = PlayerSpawner::new();

        for (delay, event) in room.initial_timers() {
            self.scheduler.schedule_in(delay, SimEvent::Room(event));
        }
        if !room.is_full() {
            spawner.start(
                &mut self.scheduler,
                self.config.spawn_interval,
                SimEvent::SpawnTick,
            );
        }

        while let Some(fired) = self.scheduler.next().await {
            room = match fired.event {
                SimEvent::Room(event) => self.apply(room, event, fired.at).0,
                SimEvent::SpawnTick => self.spawn(room, &mut spawner, fired.at)?,
            };
            if room.is_ended() {
                spawner.stop(&mut self.scheduler);
                break;
            }
        }

        if !room.is_ended() {
            let at = self.scheduler.now();
            tracing::error!(room_id = %room.id(), phase = %room.phase(), %at, "scheduler ran dry");
            return Err(PokecatchError::Stalled { at });
        }

        let summary = room.summary();
        tracing::info!(
            room_id = %summary.room_id,
            pokemon = %summary.pokemon,
            caught = summary.caught_count(),
            players = summary.players.len(),
            "{} of {} player(s) caught {}",
            summary.caught_count(),
            summary.players.len(),
            summary.pokemon
        );

        Ok(RunReport {
            seed: self.config.seed,
            room: summary,
            joins_accepted: spawner.accepted(),
            joins_rejected: spawner.rejected(),
            finished_at: self.scheduler.now(),
        })
    }

    fn open_room(&mut self) -> Result<Room, PokecatchError> {
        let now = self.scheduler.now();
        let leader = Player::leader(
            self.ids.player_id(now, &mut self.rng),
            &self.config.leader_name,
        )?;

        let name = self
            .config
            .pokemon_pool
            .choose(&mut self.rng)
            .ok_or_else(|| PokecatchError::InvalidConfig("Pokemon pool is empty".into()))?;
        let pokemon = Pokemon::new(name, &self.config.location)?;

        Ok(Room::new(
            leader,
            pokemon,
            self.config.room.clone(),
            now,
            &mut self.ids,
            &mut self.rng,
        )?)
    }

    /// Applies one event and schedules whatever it asks for next.
    fn apply(&mut self, room: Room, event: RoomEvent, now: SimTime) -> (Room, Outcome) {
        let kind = event.kind();
        let Step {
            room,
            outcome,
            follow_ups,
        } = room.apply(event, now, &mut self.rng);

        tracing::debug!(event = kind, %now, outcome = ?outcome, "room event applied");
        for (delay, next) in follow_ups {
            self.scheduler.schedule_in(delay, SimEvent::Room(next));
        }
        (room, outcome)
    }

    fn spawn(
        &mut self,
        room: Room,
        spawner: &mut PlayerSpawner,
        now: SimTime,
    ) -> Result<Room, PokecatchError> {
        if !room.accepts_joins_at(now) {
            spawner.stop(&mut self.scheduler);
            return Ok(room);
        }

        let player = spawner.next_player(&mut self.ids, now, &mut self.rng)?;
        let (room, outcome) = self.apply(room, RoomEvent::Join(player), now);
        spawner.record(matches!(outcome, Outcome::Joined { .. }));

        if room.is_full() {
            spawner.stop(&mut self.scheduler);
        }
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_invalid_config() {
        let err = Simulation::builder().max_players(0).build().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_builder_sets_fields() {
        let sim = Simulation::builder()
            .max_players(4)
            .leader_name("Ash")
            .seed(9)
            .spawn_interval(Duration::from_millis(500))
            .pacing(Pacing::RealTime)
            .build()
            .unwrap();

        assert_eq!(sim.config().room.max_players, 4);
        assert_eq!(sim.config().leader_name, "Ash");
        assert_eq!(sim.config().seed, Some(9));
        assert_eq!(sim.config().spawn_interval, Duration::from_millis(500));
        assert_eq!(sim.pacing(), Pacing::RealTime);
    }

    #[tokio::test]
    async fn test_run_rejects_blank_leader_name() {
        let err = Simulation::builder()
            .leader_name("   ")
            .seed(1)
            .build()
            .unwrap()
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, PokecatchError::Player(_)));
    }

    #[tokio::test]
    async fn test_run_stalls_when_event_limit_too_low() {
        let err = Simulation::builder()
            .seed(1)
            .event_limit(2)
            .build()
            .unwrap()
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, PokecatchError::Stalled { .. }));
    }
}
