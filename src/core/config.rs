//! # Streamer configuration.
//!
//! Provides [`StreamerConfig`], the settings of a [`NumberStreamer`](crate::NumberStreamer).
//!
//! ## Sentinel values
//! - `period = 0s` → clamped to 1 ms (tokio intervals reject a zero period)
//! - `bound = 0` → clamped to 1 (every value is `0`)
//! - `bus_capacity = 0` → clamped to 1
//! - `grace = 0s` → `stop()` aborts the ticker unless it has already exited

use std::time::Duration;

/// Delay before the first tick.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Time between two ticks.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

/// Time `stop()` waits for the ticker to exit before aborting it.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(10);

/// Exclusive upper bound of generated values.
pub const DEFAULT_BOUND: u32 = 10;

/// Configuration for a number streamer.
///
/// ## Field semantics
/// - `delay`: wait before the first tick (`0s` = tick immediately on start)
/// - `period`: time between ticks (fixed-delay; a slow tick pushes the next one back)
/// - `bound`: values are drawn from `[0, bound)` by the default source
/// - `bus_capacity`: diagnostics bus ring buffer size
/// - `grace`: maximum wait for the ticker to exit on `stop()`
#[derive(Clone, Debug)]
pub struct StreamerConfig {
    /// Delay before the first tick.
    pub delay: Duration,

    /// Interval between ticks.
    pub period: Duration,

    /// Exclusive upper bound for the default [`UniformSource`](crate::UniformSource).
    ///
    /// Ignored when a custom source is installed through the builder.
    pub bound: u32,

    /// Capacity of the diagnostics event bus.
    ///
    /// Slow event receivers that lag behind more than `bus_capacity` messages
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Maximum time to wait for the ticker to exit after cancellation.
    ///
    /// Cancellation is observed between ticks, so a listener that never
    /// returns keeps the ticker alive. Past `grace`, `stop()` aborts the
    /// ticker and returns `StreamError::GraceExceeded`.
    pub grace: Duration,
}

impl StreamerConfig {
    /// Returns the tick period, never zero.
    #[inline]
    pub fn period_clamped(&self) -> Duration {
        self.period.max(Duration::from_millis(1))
    }

    /// Returns the value bound, never zero.
    #[inline]
    pub fn bound_clamped(&self) -> u32 {
        self.bound.max(1)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for StreamerConfig {
    /// Default configuration:
    ///
    /// - `delay = 1s`
    /// - `period = 1s`
    /// - `bound = 10` (values in `[0, 10)`)
    /// - `bus_capacity = 1024`
    /// - `grace = 10s`
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            period: DEFAULT_PERIOD,
            bound: DEFAULT_BOUND,
            bus_capacity: 1024,
            grace: DEFAULT_GRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = StreamerConfig::default();
        assert_eq!(cfg.delay, Duration::from_secs(1));
        assert_eq!(cfg.period, Duration::from_secs(1));
        assert_eq!(cfg.bound, 10);
        assert_eq!(cfg.grace, Duration::from_secs(10));
    }

    #[test]
    fn test_sentinels_clamp() {
        let cfg = StreamerConfig {
            delay: Duration::ZERO,
            period: Duration::ZERO,
            bound: 0,
            bus_capacity: 0,
            grace: Duration::ZERO,
        };
        assert_eq!(cfg.period_clamped(), Duration::from_millis(1));
        assert_eq!(cfg.bound_clamped(), 1);
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
