//! Mixer: accumulates and joins integer sample buffers.

use super::{PCM_MAX, Sample, Waveform};

/// An append-only accumulation buffer.
///
/// `add` sums into an existing index or appends when the index is the
/// next one past the end, which is how the arpeggio layers its notes.
#[derive(Debug, Clone, Default)]
pub struct Mixer {
    buffer: Vec<Sample>,
}

impl Mixer {
    pub fn new() -> Self {
        Mixer { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Mixer {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Add a sample at the given index. Gaps past the end are zero-filled.
    pub fn add(&mut self, index: usize, sample: Sample) {
        if index < self.buffer.len() {
            self.buffer[index] += sample;
        } else {
            self.buffer.resize(index, 0);
            self.buffer.push(sample);
        }
    }

    /// Append samples after the current end.
    pub fn extend(&mut self, samples: &[Sample]) {
        self.buffer.extend_from_slice(samples);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Freeze the buffer into a waveform.
    pub fn finish(self) -> Waveform {
        Waveform::from_samples(self.buffer)
    }
}

/// Concatenate waveforms in order.
pub fn concat<'a, I>(parts: I) -> Waveform
where
    I: IntoIterator<Item = &'a Waveform>,
{
    let mut mixer = Mixer::new();
    for part in parts {
        mixer.extend(part.samples());
    }
    mixer.finish()
}

/// Clamp samples to [-32767, 32767] and narrow to 16 bits.
pub fn to_pcm_i16(samples: &[Sample]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| s.clamp(-PCM_MAX, PCM_MAX) as i16)
        .collect()
}
