//! The catch capability.
//!
//! A mission doesn't care who is in the roster, only that each entry can
//! attempt a catch and be marked as having played. [`Catchable`] is that
//! seam: [`Player`](crate::Player) implements it for real runs, and tests
//! plug in scripted catchers to pin outcomes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use pokecatch_types::PlayerId;

/// Probability that a single catch attempt succeeds.
///
/// Always within `0.0..=1.0`; [`CatchOdds::new`] clamps out-of-range
/// input and maps NaN to the default coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct CatchOdds(f64);

impl CatchOdds {
    /// A fair coin flip.
    pub const COIN_FLIP: CatchOdds = CatchOdds(0.5);
    /// Every attempt succeeds.
    pub const ALWAYS: CatchOdds = CatchOdds(1.0);
    /// Every attempt fails.
    pub const NEVER: CatchOdds = CatchOdds(0.0);

    pub fn new(probability: f64) -> Self {
        if probability.is_nan() {
            return Self::COIN_FLIP;
        }
        Self(probability.clamp(0.0, 1.0))
    }

    pub fn probability(self) -> f64 {
        self.0
    }

    /// Draws one outcome from `rng`.
    pub fn roll<R: Rng>(self, rng: &mut R) -> bool {
        rng.random_bool(self.0)
    }
}

impl Default for CatchOdds {
    fn default() -> Self {
        Self::COIN_FLIP
    }
}

/// Deserialized odds go through the same clamping as [`CatchOdds::new`].
impl From<f64> for CatchOdds {
    fn from(probability: f64) -> Self {
        Self::new(probability)
    }
}

impl From<CatchOdds> for f64 {
    fn from(odds: CatchOdds) -> Self {
        odds.0
    }
}

/// Something that can take part in a mission.
///
/// Catching has no effect on the catcher itself; the mission records the
/// returned outcome and then calls [`mark_as_played`](Self::mark_as_played).
pub trait Catchable {
    /// Key under which the mission records this catcher's result.
    fn id(&self) -> &PlayerId;

    /// Display name, used in logs and reports.
    fn name(&self) -> &str;

    /// Attempts to catch `pokemon`. Returns `true` on success.
    fn catch_pokemon<R: Rng>(&self, pokemon: &str, odds: CatchOdds, rng: &mut R) -> bool;

    /// Records that this catcher has taken its turn. Idempotent.
    fn mark_as_played(&mut self);

    fn has_played(&self) -> bool;
}
