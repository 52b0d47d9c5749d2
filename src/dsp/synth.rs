//! Sound-effect generators.
//!
//! Each generator renders `floor(duration × SAMPLE_RATE)` samples at
//! `t = i / SAMPLE_RATE` and truncates every sample toward zero. The
//! order of floating-point operations is part of the contract: changing
//! it changes the low bits of already-published assets.

use super::envelope::{Ramp, exp_decay, tail_fade};
use super::mixer::Mixer;
use super::oscillator::{Glide, sine};
use super::{PCM_MAX, Sample, Waveform, sample_count, sample_time};

/// Full-scale amplitude as a float.
const FULL_SCALE: f64 = PCM_MAX as f64;

/// Partials of the impact thump, in Hz.
pub const IMPACT_PARTIALS: [f64; 3] = [80.0, 120.0, 200.0];
/// Impact decay rate (per second).
pub const IMPACT_DECAY: f64 = 10.0;

/// Click carrier frequency in Hz.
pub const CLICK_FREQUENCY: f64 = 3000.0;
/// Click decay rate (per second).
pub const CLICK_DECAY: f64 = 100.0;

/// C major arpeggio: C5, E5, G5, C6.
pub const SUCCESS_NOTES: [f64; 4] = [523.0, 659.0, 784.0, 1047.0];

pub const DEFAULT_VOLUME: f64 = 0.3;
pub const DEFAULT_FADE_OUT: f64 = 0.1;
pub const DEFAULT_IMPACT_VOLUME: f64 = 0.5;
pub const DEFAULT_CLICK_DURATION: f64 = 0.05;
pub const DEFAULT_SUCCESS_DURATION: f64 = 0.8;
pub const DEFAULT_SUCCESS_VOLUME: f64 = 0.4;

/// Render `count` samples by evaluating `f` at each sample time.
fn render(count: usize, f: impl Fn(f64) -> f64) -> Waveform {
    let samples = (0..count)
        .map(|i| f(sample_time(i)) as Sample)
        .collect();
    Waveform::from_samples(samples)
}

/// Pure sine tone with a linear fade over its last `fade_out` seconds.
///
/// `fade_out = 0` disables the fade. A `fade_out` longer than the tone
/// fades from the first sample without reaching full volume.
pub fn tone(frequency: f64, duration: f64, volume: f64, fade_out: f64) -> Waveform {
    render(sample_count(duration), |t| {
        let mut sample = sine(frequency, t);
        if let Some(fade) = tail_fade(t, duration, fade_out) {
            sample *= fade;
        }
        sample * (volume * FULL_SCALE)
    })
}

/// Linear frequency sweep with a 10 ms attack and 100 ms release.
pub fn sweep(start_freq: f64, end_freq: f64, duration: f64, volume: f64) -> Waveform {
    let glide = Glide::new(start_freq, end_freq, duration);
    let ramp = Ramp::new(duration);
    render(sample_count(duration), |t| {
        glide.sample_at(t) * (volume * ramp.level(t) * FULL_SCALE)
    })
}

/// Percussive thump: three low partials under a fast exponential decay.
pub fn impact(duration: f64, volume: f64) -> Waveform {
    render(sample_count(duration), |t| {
        let body: f64 = IMPACT_PARTIALS
            .iter()
            .fold(0.0, |acc, &freq| acc + sine(freq, t) / 3.0);
        body * (exp_decay(IMPACT_DECAY, t) * volume * FULL_SCALE)
    })
}

/// Short high-frequency burst with a very fast decay.
pub fn click(duration: f64, volume: f64) -> Waveform {
    render(sample_count(duration), |t| {
        sine(CLICK_FREQUENCY, t) * (exp_decay(CLICK_DECAY, t) * volume * FULL_SCALE)
    })
}

/// Rising arpeggio over [`SUCCESS_NOTES`].
///
/// The duration is split into four equal notes; each note is shaped by
/// its own attack/release ramp and summed into the shared buffer at its
/// absolute sample index.
pub fn success(duration: f64, volume: f64) -> Waveform {
    let note_duration = duration / SUCCESS_NOTES.len() as f64;
    let ramp = Ramp::new(note_duration);
    let mut mixer = Mixer::with_capacity(sample_count(duration));

    for (idx, &freq) in SUCCESS_NOTES.iter().enumerate() {
        let note_start = sample_count(idx as f64 * note_duration);
        let note_end = sample_count((idx + 1) as f64 * note_duration);

        for i in note_start..note_end {
            let t = sample_time(i - note_start);
            let sample = sine(freq, t) * (volume * ramp.level(t) * FULL_SCALE);
            mixer.add(i, sample as Sample);
        }
    }

    mixer.finish()
}
