//! Amplitude envelopes.
//!
//! Envelopes are evaluated per sample from elapsed time and applied
//! inline; nothing here keeps state between samples.

/// Fade-in length shared by the sweep and arpeggio envelopes.
pub const RAMP_IN: f64 = 0.01;
/// Fade-out length shared by the sweep and arpeggio envelopes.
pub const RAMP_OUT: f64 = 0.1;

/// Linear tail fade: 1 until the last `fade_out` seconds of `duration`,
/// then `(duration - t) / fade_out` down to zero.
///
/// Returns `None` outside the tail so callers can skip the multiply and
/// keep the arithmetic identical to an unfaded sample.
pub fn tail_fade(t: f64, duration: f64, fade_out: f64) -> Option<f64> {
    let remaining = duration - t;
    if remaining < fade_out {
        Some(remaining / fade_out)
    } else {
        None
    }
}

/// Linear attack/release envelope with fixed ramp lengths.
///
/// The attack takes precedence: a sound shorter than both ramps never
/// enters the release branch while still inside the attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// Attack time in seconds.
    pub attack: f64,
    /// Release time in seconds.
    pub release: f64,
    /// Length of the shaped sound in seconds.
    pub duration: f64,
}

impl Ramp {
    /// Standard 10 ms attack, 100 ms release.
    pub fn new(duration: f64) -> Self {
        Ramp {
            attack: RAMP_IN,
            release: RAMP_OUT,
            duration,
        }
    }

    /// Envelope level at time `t`.
    pub fn level(&self, t: f64) -> f64 {
        if t < self.attack {
            t / self.attack
        } else if self.duration - t < self.release {
            (self.duration - t) / self.release
        } else {
            1.0
        }
    }
}

/// Exponential decay `e^(-rate·t)`.
pub fn exp_decay(rate: f64, t: f64) -> f64 {
    (-t * rate).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_fade_only_in_tail() {
        assert_eq!(tail_fade(0.0, 1.0, 0.1), None);
        assert_eq!(tail_fade(0.85, 1.0, 0.1), None);
        let f = tail_fade(0.95, 1.0, 0.1).unwrap_or(1.0);
        assert!((f - 0.5).abs() < 1e-9, "Expected half level, got {f}");
    }

    #[test]
    fn tail_fade_disabled_at_zero() {
        for i in 0..100 {
            let t = i as f64 / 100.0;
            assert_eq!(tail_fade(t, 1.0, 0.0), None);
        }
    }

    #[test]
    fn tail_fade_reaches_zero() {
        let f = tail_fade(0.999, 1.0, 0.1).unwrap_or(1.0);
        assert!(f < 0.011 && f >= 0.0, "Fade should approach zero, got {f}");
    }

    #[test]
    fn ramp_shape() {
        let ramp = Ramp::new(1.0);
        assert_eq!(ramp.level(0.0), 0.0);
        assert!((ramp.level(0.005) - 0.5).abs() < 1e-9);
        assert_eq!(ramp.level(0.5), 1.0);
        assert!((ramp.level(0.95) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ramp_range() {
        let ramp = Ramp::new(0.3);
        for i in 0..13230 {
            let level = ramp.level(i as f64 / 44100.0);
            assert!((0.0..=1.0).contains(&level), "Envelope out of range: {level}");
        }
    }

    #[test]
    fn decay_strictly_decreasing() {
        let mut prev = exp_decay(10.0, 0.0);
        assert_eq!(prev, 1.0);
        for i in 1..1000 {
            let d = exp_decay(10.0, i as f64 / 44100.0);
            assert!(d < prev, "Decay must fall monotonically");
            prev = d;
        }
    }
}
