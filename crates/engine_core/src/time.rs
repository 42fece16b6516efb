//! Time management for the game loop.
//!
//! Time is fed in two ways: `update()` samples the wall clock once per loop turn,
//! and `advance()` steps by an explicit delta (tests, headless replays). Both feed
//! the same fixed-step accumulator.

use std::time::{Duration, Instant};

/// Fixed simulation rate used for orbit stepping.
pub const FIXED_RATE_HZ: f64 = 60.0;

/// Longest delta accepted in one update. A stalled loop would otherwise replay
/// seconds of orbit steps in one go.
pub const MAX_DELTA: Duration = Duration::from_millis(250);

/// Manages frame timing, delta time and the fixed-step accumulator.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
    fixed_timestep: Duration,
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / FIXED_RATE_HZ),
            accumulator: Duration::ZERO,
        }
    }

    /// Sample the wall clock and advance by the time since the previous sample.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Advance by an explicit delta, clamped to [`MAX_DELTA`].
    pub fn advance(&mut self, delta: Duration) {
        let delta = delta.min(MAX_DELTA);
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Delta of the last update in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total simulated time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Drain the accumulator, returning how many fixed steps are due.
    pub fn drain_fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.should_fixed_update() {
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_fixed_steps() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(110));
        // 110 ms at 60 Hz is six whole steps plus a remainder.
        assert_eq!(time.drain_fixed_steps(), 6);
        assert_eq!(time.drain_fixed_steps(), 0);
        assert_eq!(time.frame_count(), 1);
    }

    #[test]
    fn advance_clamps_long_pauses() {
        let mut time = Time::new();
        time.advance(Duration::from_secs(30));
        assert!((time.delta_seconds() - 0.25).abs() < 1e-6);
        assert!((time.elapsed_seconds() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn remainder_carries_into_next_update() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(10));
        assert_eq!(time.drain_fixed_steps(), 0);
        time.advance(Duration::from_millis(10));
        assert_eq!(time.drain_fixed_steps(), 1);
    }
}
