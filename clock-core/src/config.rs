/// Settings shared by both timers for the length of a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClockConfig {
    pub initial_duration_ms: u64,
    pub increment_ms: u64,
    pub allow_negative_time: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial_duration_ms: 60 * 1000,
            increment_ms: 0,
            allow_negative_time: false,
        }
    }
}

impl ClockConfig {
    pub fn new(initial_duration_ms: u64, increment_ms: u64, allow_negative_time: bool) -> Self {
        Self {
            initial_duration_ms,
            increment_ms,
            allow_negative_time,
        }
    }

    /// Build from preference-style values: a base time in minutes and
    /// seconds plus a per-move bonus in whole seconds.
    pub fn from_minutes_seconds(
        minutes: u32,
        seconds: u32,
        increment_secs: u32,
        allow_negative_time: bool,
    ) -> Self {
        Self::new(
            (minutes as u64 * 60 + seconds as u64) * 1000,
            increment_secs as u64 * 1000,
            allow_negative_time,
        )
    }

    pub(crate) fn initial_remaining_ms(&self) -> i64 {
        clamp_ms(self.initial_duration_ms)
    }
}

/// Unsigned milliseconds as a signed remaining-time delta.
pub(crate) fn clamp_ms(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ClockConfig::default();
        assert_eq!(config.initial_duration_ms, 60_000);
        assert_eq!(config.increment_ms, 0);
        assert!(!config.allow_negative_time);
    }

    #[test]
    fn test_from_minutes_seconds() {
        let config = ClockConfig::from_minutes_seconds(5, 30, 3, true);
        assert_eq!(config.initial_duration_ms, 330_000);
        assert_eq!(config.increment_ms, 3_000);
        assert!(config.allow_negative_time);
    }

    #[test]
    fn test_clamp_ms() {
        assert_eq!(clamp_ms(1234), 1234);
        assert_eq!(clamp_ms(u64::MAX), i64::MAX);
    }
}
