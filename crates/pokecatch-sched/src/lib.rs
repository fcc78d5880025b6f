//! Virtual-clock event queue for Pokecatch.
//!
//! Every timed transition in a run (the join-window closure, the mission
//! timer, the player synthesis cadence) is an entry in one
//! [`Scheduler`]. The scheduler owns "now": popping an event advances
//! the virtual clock to that event's due time, so nothing else in the
//! system ever reads the wall clock.
//!
//! # Pacing
//!
//! - [`Pacing::Virtual`]: the clock jumps straight to the next due
//!   event. A full run completes instantly. The default for tests and
//!   the CLI.
//! - [`Pacing::RealTime`]: [`Scheduler::next`] sleeps with
//!   `tokio::time::sleep_until` until the event is due, so a run takes as
//!   long as its timers say. Under `#[tokio::test(start_paused = true)]`
//!   the sleeps auto-advance and tests stay instant.
//!
//! # Ordering
//!
//! Events fire in due-time order. Events due at the same instant fire in
//! the order they were (re)scheduled.
//!
//! # Integration
//!
//! ```ignore
//! while let Some(fired) = scheduler.next().await {
//!     match fired.event { /* apply the transition */ }
//! }
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::time::Duration;

use pokecatch_types::SimTime;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How the scheduler maps virtual time onto the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Jump straight to the next event.
    #[default]
    Virtual,
    /// Wait in real time until each event is due.
    RealTime,
}

/// Full configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub pacing: Pacing,
    /// Hard cap on events released by [`Scheduler::next`] /
    /// [`Scheduler::pop_due`]. 0 = unlimited.
    ///
    /// A repeating timer nobody cancels would otherwise keep a run alive
    /// forever.
    pub event_limit: u64,
    /// Smallest accepted repeat interval. Shorter intervals are raised
    /// to this value.
    pub min_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::Virtual,
            event_limit: 10_000,
            min_interval: Duration::from_millis(1),
        }
    }
}

impl SchedulerConfig {
    /// Config with the given pacing and default limits.
    pub fn with_pacing(pacing: Pacing) -> Self {
        Self {
            pacing,
            ..Default::default()
        }
    }

    /// Fix any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`Scheduler::new`]. A zero `min_interval`
    /// is raised to 1 ms so a repeating timer always makes progress.
    pub fn validated(mut self) -> Self {
        if self.min_interval.is_zero() {
            warn!("min_interval is zero, raising to 1ms");
            self.min_interval = Duration::from_millis(1);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// Handle to a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// An event released by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    /// The timer that produced this event. For repeating timers the same
    /// id is returned on every firing.
    pub timer: TimerId,
    /// Virtual time the event was due (and the clock's new value).
    pub at: SimTime,
    pub event: E,
}

struct TimerSlot<E> {
    event: E,
    /// `Some` for repeating timers.
    every: Option<Duration>,
    /// Clones `event` for each repeat. Only set for repeating timers,
    /// which keeps the `Clone` bound off one-shot schedulers.
    repeat: Option<fn(&E) -> E>,
}

/// Queue key: due time, then insertion order.
type QueueKey = Reverse<(SimTime, u64, TimerId)>;

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Event queue with a virtual clock.
///
/// One scheduler per run. Events are plain values of type `E`; the
/// scheduler never inspects them.
pub struct Scheduler<E> {
    config: SchedulerConfig,
    now: SimTime,
    queue: BinaryHeap<QueueKey>,
    /// Live timers. A queue entry whose timer is missing here was
    /// cancelled and is skipped when popped.
    timers: HashMap<TimerId, TimerSlot<E>>,
    next_seq: u64,
    next_timer: u64,
    fired: u64,
    /// Wall-clock anchor for `SimTime::ZERO` in real-time mode. Set on
    /// the first call to `next`.
    origin: Option<TokioInstant>,
}

impl<E> Scheduler<E> {
    /// Create an empty scheduler with the clock at `SimTime::ZERO`.
    pub fn new(config: SchedulerConfig) -> Self {
        let config = config.validated();
        debug!(
            pacing = ?config.pacing,
            event_limit = config.event_limit,
            "scheduler created"
        );
        Self {
            config,
            now: SimTime::ZERO,
            queue: BinaryHeap::new(),
            timers: HashMap::new(),
            next_seq: 0,
            next_timer: 0,
            fired: 0,
            origin: None,
        }
    }

    /// Create a scheduler with the given pacing and default limits.
    pub fn with_pacing(pacing: Pacing) -> Self {
        Self::new(SchedulerConfig::with_pacing(pacing))
    }

    /// Current virtual time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn pacing(&self) -> Pacing {
        self.config.pacing
    }

    /// Schedule `event` to fire once, `delay` from now.
    pub fn schedule_in(&mut self, delay: Duration, event: E) -> TimerId {
        self.schedule_at(self.now + delay, event)
    }

    /// Schedule `event` to fire once at `at`.
    ///
    /// A time in the past fires at the current time, after anything
    /// already due now.
    pub fn schedule_at(&mut self, at: SimTime, event: E) -> TimerId {
        let at = at.max(self.now);
        let id = self.insert(TimerSlot {
            event,
            every: None,
            repeat: None,
        });
        self.enqueue(at, id);
        trace!(timer = %id, %at, "one-shot timer scheduled");
        id
    }

    /// Cancel a timer. Returns `true` if it was still pending.
    ///
    /// Cancelling a repeating timer stops all future firings.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(&id).is_some();
        if removed {
            debug!(timer = %id, now = %self.now, "timer cancelled");
        }
        removed
    }

    /// Whether `id` will still fire.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// `true` when no live timer remains.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Events released so far.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    /// Due time of the next live event, if any.
    pub fn next_due(&mut self) -> Option<SimTime> {
        self.discard_cancelled();
        self.queue.peek().map(|Reverse((at, _, _))| *at)
    }

    /// Release the next event, advancing the virtual clock to its due
    /// time without waiting. Ignores [`Pacing`].
    ///
    /// Returns `None` when the queue is empty or the event limit is hit.
    pub fn pop_due(&mut self) -> Option<Fired<E>> {
        if self.config.event_limit > 0 && self.fired >= self.config.event_limit {
            warn!(
                limit = self.config.event_limit,
                pending = self.timers.len(),
                "event limit reached, scheduler stopped"
            );
            return None;
        }

        self.discard_cancelled();
        let Reverse((at, _, id)) = self.queue.pop()?;
        self.now = at;
        self.fired += 1;

        let slot = self.timers.remove(&id)?;
        let event = match (slot.every, slot.repeat) {
            (Some(every), Some(repeat)) => {
                let next = repeat(&slot.event);
                self.timers.insert(id, slot);
                self.enqueue(at + every, id);
                next
            }
            _ => slot.event,
        };

        trace!(timer = %id, %at, fired = self.fired, "timer fired");
        Some(Fired {
            timer: id,
            at,
            event,
        })
    }

    /// Wait for the next event according to the configured [`Pacing`].
    ///
    /// In virtual mode this resolves immediately. In real-time mode it
    /// sleeps until the event's due time, measured from the first call.
    pub async fn next(&mut self) -> Option<Fired<E>> {
        if self.config.pacing == Pacing::RealTime {
            let origin = *self
                .origin
                .get_or_insert_with(|| TokioInstant::now() - self.now.as_duration());
            if let Some(due) = self.next_due() {
                time::sleep_until(origin + due.as_duration()).await;
            }
        }
        self.pop_due()
    }

    fn insert(&mut self, slot: TimerSlot<E>) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.timers.insert(id, slot);
        id
    }

    fn enqueue(&mut self, at: SimTime, id: TimerId) {
        self.next_seq += 1;
        self.queue.push(Reverse((at, self.next_seq, id)));
    }

    /// Drop queue heads that belong to cancelled timers.
    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, _, id))) = self.queue.peek() {
            if self.timers.contains_key(id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<E: Clone> Scheduler<E> {
    /// Schedule `event` to fire every `interval`, starting one interval
    /// from now, until cancelled.
    pub fn schedule_every(&mut self, interval: Duration, event: E) -> TimerId {
        let interval = interval.max(self.config.min_interval);
        let id = self.insert(TimerSlot {
            event,
            every: Some(interval),
            repeat: Some(E::clone),
        });
        self.enqueue(self.now + interval, id);
        debug!(
            timer = %id,
            interval_ms = interval.as_millis() as u64,
            "repeating timer scheduled"
        );
        id
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl<E> fmt::Debug for Scheduler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pacing", &self.config.pacing)
            .field("now", &self.now)
            .field("pending", &self.timers.len())
            .field("fired", &self.fired)
            .finish()
    }
}
