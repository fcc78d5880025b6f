//! Virtual timestamps.
//!
//! A [`SimTime`] is the number of milliseconds elapsed since a run
//! started. Nothing in Pokecatch reads the wall clock directly: the
//! scheduler owns "now" and hands it to every operation that needs it.
//! That keeps every transition reproducible in tests.

use std::fmt;
use std::ops::Add;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Milliseconds since the start of a run.
///
/// Serialized as a plain number (`#[serde(transparent)]`), so
/// `SimTime::from_millis(5000)` becomes `5000` in JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
    Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(u64);

impl SimTime {
    /// The instant a run starts.
    pub const ZERO: SimTime = SimTime(0);

    /// Creates a timestamp `ms` milliseconds after the run started.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the run started.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Elapsed time since the run started.
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

/// Saturates at `u64::MAX` milliseconds instead of overflowing.
impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> SimTime {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        SimTime(self.0.saturating_add(ms))
    }
}

/// Prints as `t+5.000s`.
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}.{:03}s", self.0 / 1000, self.0 % 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_duration_advances_millis() {
        let t = SimTime::from_millis(1_000) + Duration::from_secs(5);
        assert_eq!(t.as_millis(), 6_000);
    }

    #[test]
    fn test_add_duration_saturates() {
        let t = SimTime::from_millis(u64::MAX - 1) + Duration::from_secs(1);
        assert_eq!(t.as_millis(), u64::MAX);
    }

    #[test]
    fn test_display_formats_seconds_and_millis() {
        assert_eq!(SimTime::from_millis(5_000).to_string(), "t+5.000s");
        assert_eq!(SimTime::from_millis(15_042).to_string(), "t+15.042s");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_sim_time_serializes_as_plain_number() {
        let json = serde_json::to_string(&SimTime::from_millis(5_000)).unwrap();
        assert_eq!(json, "5000");
    }
}
