//! Synthesized players.
//!
//! While the join window is open, the driver asks the spawner for one new
//! player per tick. Names follow the tick count (`Player 1`, `Player 2`,
//! ...), so a rejected join still consumes its number.

use std::time::Duration;

use pokecatch_player::{Player, PlayerError};
use pokecatch_sched::{Scheduler, TimerId};
use pokecatch_types::{IdGenerator, SimTime};
use rand::Rng;

/// Drives the repeating spawn timer and mints the players it produces.
#[derive(Debug, Default)]
pub struct PlayerSpawner {
    timer: Option<TimerId>,
    spawned: usize,
    accepted: usize,
    rejected: usize,
}

impl PlayerSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the repeating timer. The first tick lands one `interval`
    /// from now. Does nothing if already running.
    pub fn start<E: Clone>(&mut self, scheduler: &mut Scheduler<E>, interval: Duration, tick: E) {
        if self.timer.is_some() {
            return;
        }
        let id = scheduler.schedule_every(interval, tick);
        tracing::debug!(timer = %id, interval_ms = interval.as_millis() as u64, "player spawner started");
        self.timer = Some(id);
    }

    /// Cancels the timer. Returns `true` if it was running.
    pub fn stop<E>(&mut self, scheduler: &mut Scheduler<E>) -> bool {
        match self.timer.take() {
            Some(id) => {
                scheduler.cancel(id);
                tracing::debug!(
                    timer = %id,
                    spawned = self.spawned,
                    "player spawner stopped"
                );
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Mints the next synthesized player.
    pub fn next_player<R: Rng>(
        &mut self,
        ids: &mut IdGenerator,
        now: SimTime,
        rng: &mut R,
    ) -> Result<Player, PlayerError> {
        self.spawned += 1;
        Player::new(ids.player_id(now, rng), &format!("Player {}", self.spawned))
    }

    /// Records whether the room took the last spawned player.
    pub fn record(&mut self, accepted: bool) {
        if accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_next_player_numbers_sequentially() {
        let mut spawner = PlayerSpawner::new();
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);

        let a = spawner.next_player(&mut ids, SimTime::ZERO, &mut rng).unwrap();
        let b = spawner.next_player(&mut ids, SimTime::ZERO, &mut rng).unwrap();

        assert_eq!(a.name(), "Player 1");
        assert_eq!(b.name(), "Player 2");
        assert!(!a.is_leader());
        assert_ne!(a.id(), b.id());
        assert_eq!(spawner.spawned(), 2);
    }

    #[test]
    fn test_start_is_idempotent_and_stop_cancels() {
        let mut scheduler: Scheduler<u8> = Scheduler::default();
        let mut spawner = PlayerSpawner::new();

        spawner.start(&mut scheduler, Duration::from_secs(1), 0);
        spawner.start(&mut scheduler, Duration::from_secs(1), 0);
        assert!(spawner.is_running());
        assert_eq!(scheduler.pending(), 1);

        assert!(spawner.stop(&mut scheduler));
        assert!(!spawner.stop(&mut scheduler));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut spawner = PlayerSpawner::new();
        spawner.record(true);
        spawner.record(false);
        spawner.record(true);
        assert_eq!(spawner.accepted(), 2);
        assert_eq!(spawner.rejected(), 1);
    }
}
