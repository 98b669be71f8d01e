//! Run configuration: array sizes, value ranges, playback delay and history
//!
//! Size input arrives as free text from the command line or the UI. It is
//! never rejected: numbers are clamped into range and anything unparsable
//! falls back to the mode's default.

use crate::algorithms::Value;
use rand::Rng;
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Allowed array sizes for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

/// Single-run sizes
pub const SOLO_SIZE: SizeLimits = SizeLimits {
    min: 5,
    max: 200,
    default: 100,
};

/// Per-competitor sizes in arena mode
pub const ARENA_SIZE: SizeLimits = SizeLimits {
    min: 5,
    max: 100,
    default: 50,
};

/// Values generated for a single run
pub const SOLO_VALUES: RangeInclusive<Value> = 10..=400;

/// Values generated for an arena seed array
pub const ARENA_VALUES: RangeInclusive<Value> = 10..=300;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Snapshots retained for stepping back
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

impl SizeLimits {
    /// Parse user input, clamping numbers and defaulting on garbage
    pub fn parse(&self, input: &str) -> usize {
        match input.trim().parse::<i64>() {
            Ok(n) if n < self.min as i64 => self.min,
            Ok(n) => self.clamp(usize::try_from(n).unwrap_or(self.max)),
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => self.max,
            Err(err) if *err.kind() == IntErrorKind::NegOverflow => self.min,
            Err(_) => {
                tracing::debug!(input, default = self.default, "malformed size, using default");
                self.default
            }
        }
    }

    pub fn clamp(&self, size: usize) -> usize {
        size.clamp(self.min, self.max)
    }
}

/// Settings shared by every run a player drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Interval between auto-advances
    pub delay: Duration,
    /// Maximum snapshots kept in history (and future)
    pub history_limit: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            delay: DEFAULT_DELAY,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl PlaybackConfig {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }
}

/// Generate `size` uniformly random values from `values`
pub fn generate_array<R: Rng + ?Sized>(size: usize, values: RangeInclusive<Value>, rng: &mut R) -> Vec<Value> {
    (0..size).map(|_| rng.random_range(values.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_clamps() {
        assert_eq!(SOLO_SIZE.parse("50"), 50);
        assert_eq!(SOLO_SIZE.parse("  7 "), 7);
        assert_eq!(SOLO_SIZE.parse("1"), 5);
        assert_eq!(SOLO_SIZE.parse("-20"), 5);
        assert_eq!(SOLO_SIZE.parse("1000"), 200);
        assert_eq!(ARENA_SIZE.parse("1000"), 100);
    }

    #[test]
    fn test_parse_clamps_beyond_integer_range() {
        assert_eq!(SOLO_SIZE.parse("99999999999999999999999"), 200);
        assert_eq!(SOLO_SIZE.parse("+99999999999999999999999"), 200);
        assert_eq!(SOLO_SIZE.parse("-99999999999999999999999"), 5);
        assert_eq!(ARENA_SIZE.parse(" 99999999999999999999999 "), 100);
    }

    #[test]
    fn test_parse_defaults_on_garbage() {
        assert_eq!(SOLO_SIZE.parse(""), 100);
        assert_eq!(SOLO_SIZE.parse("lots"), 100);
        assert_eq!(SOLO_SIZE.parse("12.5"), 100);
        assert_eq!(ARENA_SIZE.parse("abc"), 50);
        assert_eq!(SOLO_SIZE.parse("-"), 100);
    }

    #[test]
    fn test_generate_array_in_range() {
        let mut rng = SmallRng::seed_from_u64(9);
        let array = generate_array(200, SOLO_VALUES, &mut rng);
        assert_eq!(array.len(), 200);
        assert!(array.iter().all(|v| SOLO_VALUES.contains(v)));
    }

    #[test]
    fn test_history_limit_minimum() {
        let config = PlaybackConfig::default().with_history_limit(0);
        assert_eq!(config.history_limit, 1);
    }
}
