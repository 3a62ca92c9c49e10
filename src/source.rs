//! # Number sources.
//!
//! A [`NumberSource`] produces the single value of each tick.
//!
//! - [`UniformSource`]: uniform integer in `[0, bound)` from the thread-local
//!   `rand` generator (not cryptographically strong). Default for streamers.
//! - any `Fn() -> u32 + Send + Sync` closure, handy for scripted sequences.

use rand::Rng;

/// Producer of tick values.
pub trait NumberSource: Send + Sync + 'static {
    /// Returns the value for the next tick.
    fn next_number(&self) -> u32;
}

impl<F> NumberSource for F
where
    F: Fn() -> u32 + Send + Sync + 'static,
{
    fn next_number(&self) -> u32 {
        self()
    }
}

/// Uniform random integers in `[0, bound)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformSource {
    bound: u32,
}

impl UniformSource {
    /// Creates a source drawing from `[0, bound)`.
    ///
    /// A `bound` of `0` is clamped to `1` (always yields `0`).
    pub fn new(bound: u32) -> Self {
        Self {
            bound: bound.max(1),
        }
    }

    /// Exclusive upper bound.
    #[inline]
    pub fn bound(&self) -> u32 {
        self.bound
    }
}

impl NumberSource for UniformSource {
    fn next_number(&self) -> u32 {
        rand::rng().random_range(0..self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let src = UniformSource::new(10);
        let mut seen = [false; 10];
        for _ in 0..5_000 {
            let n = src.next_number();
            assert!(n < 10, "value {n} out of [0, 10)");
            seen[n as usize] = true;
        }
        assert!(seen[0], "0 never drawn");
        assert!(seen[9], "9 never drawn");
    }

    #[test]
    fn test_zero_bound_clamps() {
        let src = UniformSource::new(0);
        assert_eq!(src.bound(), 1);
        assert_eq!(src.next_number(), 0);
    }

    #[test]
    fn test_closure_is_a_source() {
        let src = || 7u32;
        assert_eq!(src.next_number(), 7);
    }
}
