//! WAV renderer: encodes a waveform as mono 16-bit PCM.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::{SAMPLE_RATE, Waveform};
use crate::error::{AssetError, Result};

/// Output format: mono, 16-bit signed little-endian, 44.1 kHz.
pub fn wav_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Encode a waveform to WAV bytes, clamping samples to the PCM range.
pub fn encode_wav(wave: &Waveform) -> Result<Vec<u8>> {
    let pcm = wave.to_pcm();
    let mut cursor = Cursor::new(Vec::with_capacity(44 + pcm.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec())?;
        for sample in pcm {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Write encoded bytes to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| AssetError::io(path, e))
}

/// Encode and write a waveform in one step.
pub fn write_wav(path: &Path, wave: &Waveform) -> Result<()> {
    let bytes = encode_wav(wave)?;
    write_file(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::synth;
    use hound::WavReader;

    #[test]
    fn wav_header_valid() {
        let wav = encode_wav(&synth::click(0.05, 0.3)).expect("encode failed");

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");

        let riff_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        assert_eq!(riff_size as usize, wav.len() - 8);

        let ch = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(ch, 1);
        let sr = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sr, 44100);
        let bits = u16::from_le_bytes([wav[34], wav[35]]);
        assert_eq!(bits, 16);
    }

    #[test]
    fn samples_are_clamped() {
        let wave = Waveform::from_samples(vec![0, 50000, -50000, 1234]);
        let wav = encode_wav(&wave).expect("encode failed");
        let mut reader = WavReader::new(Cursor::new(wav)).expect("read failed");
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 32767, -32767, 1234]);
    }

    #[test]
    fn empty_waveform_encodes() {
        let wav = encode_wav(&Waveform::default()).expect("encode failed");
        let reader = WavReader::new(Cursor::new(wav)).expect("read failed");
        assert_eq!(reader.len(), 0);
        assert_eq!(reader.spec(), wav_spec());
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("mini-games/dice/land.wav");
        let wave = synth::impact(0.3, 0.4);
        write_wav(&path, &wave).expect("write failed");

        let mut reader = WavReader::open(&path).expect("read failed");
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, wave.to_pcm());
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = encode_wav(&synth::success(0.5, 0.4)).expect("encode failed");
        let b = encode_wav(&synth::success(0.5, 0.4)).expect("encode failed");
        assert_eq!(a, b);
    }
}
