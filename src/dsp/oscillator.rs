//! Sine oscillators evaluated at absolute time.
//!
//! The generators sample `sin(2π·f·t)` directly instead of advancing a
//! phase accumulator, which keeps each sample a closed-form function of
//! its index.

use std::f64::consts::PI;

/// `sin(2π·frequency·t)`.
pub fn sine(frequency: f64, t: f64) -> f64 {
    (2.0 * PI * frequency * t).sin()
}

/// Linear frequency glide from `start` to `end` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

impl Glide {
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        Glide {
            start,
            end,
            duration,
        }
    }

    /// Frequency reached at time `t`.
    pub fn frequency_at(&self, t: f64) -> f64 {
        let progress = t / self.duration;
        self.start + (self.end - self.start) * progress
    }

    /// Sample at time `t`, using the instantaneous frequency as if it had
    /// been held since `t = 0`. This is not phase-continuous; existing
    /// assets were rendered this way.
    pub fn sample_at(&self, t: f64) -> f64 {
        sine(self.frequency_at(t), t)
    }
}
