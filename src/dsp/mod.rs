//! DSP: deterministic sound-effect synthesis.
//!
//! Every generator is a pure function of its parameters: the same call
//! always yields the same samples, so regenerated assets stay
//! bit-identical to the ones already shipped.

pub mod envelope;
pub mod mixer;
pub mod oscillator;
pub mod renderer;
pub mod synth;

/// Output sample rate in Hz (mono, 16-bit).
pub const SAMPLE_RATE: u32 = 44100;

/// Largest magnitude a persisted sample may take.
pub const PCM_MAX: i32 = 32767;

/// One PCM amplitude. Held as `i32` so additive composites can overshoot
/// the 16-bit range until the renderer clamps.
pub type Sample = i32;

/// Number of samples covering `duration` seconds, rounded down.
///
/// Negative and NaN durations give zero samples.
pub fn sample_count(duration: f64) -> usize {
    (SAMPLE_RATE as f64 * duration) as usize
}

/// Time in seconds of sample index `i`.
pub fn sample_time(i: usize) -> f64 {
    i as f64 / SAMPLE_RATE as f64
}

/// An ordered, immutable sequence of samples produced by a generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Waveform {
    samples: Vec<Sample>,
}

impl Waveform {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Waveform { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds at [`SAMPLE_RATE`].
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / SAMPLE_RATE as f64
    }

    /// Samples clamped to the persisted PCM range.
    pub fn to_pcm(&self) -> Vec<i16> {
        mixer::to_pcm_i16(&self.samples)
    }
}
