//! WAV container codec
//!
//! Mono, 16-bit signed integer PCM, kept entirely in memory.
//!
//! Quantization: `round(clamp(s, -1, 1) * 32767)`; the inverse divides by
//! 32767.0, so a round trip is exact to within half a quantization step.

use crate::error::{ModemError, Result};
use crate::PCM_FULL_SCALE;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::io::Cursor;

const BITS_PER_SAMPLE: u16 = 16;

/// PCM samples recovered from a WAV container
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

pub fn quantize(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * PCM_FULL_SCALE).round() as i16
}

pub fn dequantize(sample: i16) -> f64 {
    sample as f64 / PCM_FULL_SCALE
}

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Encode samples in [-1, 1] as a 16-bit mono WAV file.
///
/// Out-of-range samples are clipped.
pub fn encode_wav(samples: &[f64], sample_rate: u32) -> Result<Vec<u8>> {
    if sample_rate == 0 {
        return Err(ModemError::UnsupportedAudio(
            "WAV sample rate must be at least 1 Hz".to_string(),
        ));
    }

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
        for &sample in samples {
            writer.write_sample(quantize(sample))?;
        }
        writer.finalize()?;
    }

    let bytes = cursor.into_inner();
    debug!(
        "encoded {} samples at {} Hz into {} WAV bytes",
        samples.len(),
        sample_rate,
        bytes.len()
    );
    Ok(bytes)
}

/// Decode a 16-bit mono WAV file back into samples in [-1, 1]
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(ModemError::UnsupportedAudio(format!(
            "expected mono audio, got {} channels",
            spec.channels
        )));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(ModemError::UnsupportedAudio(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let pcm: std::result::Result<Vec<i16>, hound::Error> = reader.samples::<i16>().collect();
    let samples: Vec<f64> = pcm?.into_iter().map(dequantize).collect();

    debug!(
        "decoded {} samples at {} Hz from {} WAV bytes",
        samples.len(),
        spec.sample_rate,
        bytes.len()
    );

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}
