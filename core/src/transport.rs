//! Byte-level wrappers for moving modem audio through text channels
//!
//! bytes → bits (MSB first) → FSK/CPFSK → 16-bit WAV → Base64, and back.

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::config::ModemConfig;
use crate::demodulator::Demodulator;
use crate::error::Result;
use crate::modulator::{Modulation, Modulator};
use crate::wav::{decode_wav, encode_wav};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, warn};

/// Standard Base64 (with padding)
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Standard Base64 decode; ASCII whitespace (line wrapping) is ignored
pub fn from_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// A payload modulated and packed into a WAV container
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAudio {
    pub wav: Vec<u8>,
    pub samples: usize,
    pub duration_secs: f64,
}

/// Bytes recovered from a WAV container
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    pub data: Vec<u8>,
    pub bits: usize,
    pub samples: usize,
}

/// Modulate a byte payload with a prepared modulator into a WAV container
pub fn modulate_to_wav(modulator: &Modulator, data: &[u8]) -> Result<EncodedAudio> {
    let sample_rate = modulator.config().wav_sample_rate()?;
    let waveform = modulator.modulate(&bytes_to_bits(data))?;
    let wav = encode_wav(&waveform.samples, sample_rate)?;

    Ok(EncodedAudio {
        wav,
        samples: waveform.len(),
        duration_secs: waveform.duration_secs(),
    })
}

/// Demodulate a WAV container with a prepared demodulator.
///
/// The demodulator's sample rate drives demodulation; the container's rate
/// is only checked for consistency.
pub fn demodulate_wav(demodulator: &Demodulator, wav: &[u8]) -> Result<DecodedPayload> {
    let audio = decode_wav(wav)?;

    let configured = demodulator.config().sample_rate;
    if f64::from(audio.sample_rate) != configured {
        warn!(
            "WAV sample rate {} Hz differs from configured {} Hz; using the configured rate",
            audio.sample_rate, configured
        );
    }

    let bits = demodulator.demodulate(&audio.samples);
    if bits.len() % 8 != 0 {
        debug!("{} bits is not a whole number of bytes, last byte is zero-padded", bits.len());
    }

    Ok(DecodedPayload {
        data: bits_to_bytes(&bits),
        bits: bits.len(),
        samples: audio.samples.len(),
    })
}

/// Modulate a byte payload into a WAV container
pub fn bytes_to_wav(data: &[u8], modulation: Modulation, config: &ModemConfig) -> Result<Vec<u8>> {
    let modulator = Modulator::new(*config, modulation)?;
    Ok(modulate_to_wav(&modulator, data)?.wav)
}

/// Demodulate a WAV container produced by either modulation
pub fn wav_to_bytes(wav: &[u8], config: &ModemConfig) -> Result<Vec<u8>> {
    let demodulator = Demodulator::new(config)?;
    Ok(demodulate_wav(&demodulator, wav)?.data)
}

/// Modulate bytes and return the WAV container as Base64 text
pub fn bytes_to_audio_base64(
    data: &[u8],
    modulation: Modulation,
    config: &ModemConfig,
) -> Result<String> {
    let wav = bytes_to_wav(data, modulation, config)?;
    Ok(to_base64(&wav))
}

/// Recover bytes from Base64 WAV text (FSK or CPFSK).
///
/// The configuration is checked before the text is decoded.
pub fn audio_base64_to_bytes(audio: &str, config: &ModemConfig) -> Result<Vec<u8>> {
    let demodulator = Demodulator::new(config)?;
    let wav = from_base64(audio)?;
    Ok(demodulate_wav(&demodulator, &wav)?.data)
}
