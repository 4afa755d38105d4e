//! Binary FSK / CPFSK acoustic modem
//!
//! Turns bits into audio tones (one carrier per bit value) and recovers them
//! with a non-coherent quadrature correlator. Both the discontinuous-phase
//! and the continuous-phase waveforms decode with the same demodulator.

pub mod error;
pub mod config;
pub mod bits;
pub mod mapper;
pub mod synthesis;
pub mod modulator;
pub mod detector;
pub mod demodulator;
pub mod wav;
pub mod transport;

pub use config::{FrequencyAssignment, ModemConfig, SymbolTiming};
pub use demodulator::{demodulate, Demodulator};
pub use detector::{SymbolCorrelationDetector, SymbolScore};
pub use error::{ModemError, Result};
pub use modulator::{modulate_cpfsk, modulate_fsk, Modulation, Modulator};
pub use synthesis::{ContinuousPhase, DiscontinuousPhase, PhaseStrategy, Waveform};
pub use transport::{
    audio_base64_to_bytes, bytes_to_audio_base64, DecodedPayload, EncodedAudio,
};

// Calibration settings (Bell 202 style tone pair at CD sample rate)
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;
pub const DEFAULT_BAUD_RATE: f64 = 300.0;
pub const DEFAULT_FREQ0: f64 = 1200.0; // Hz, bit 0
pub const DEFAULT_FREQ1: f64 = 2200.0; // Hz, bit 1

// Upper bound on floor(sample_rate / baud_rate); each detector holds four
// reference tables of this length
pub const MAX_SAMPLES_PER_SYMBOL: usize = 1 << 20;

// 16-bit PCM full scale used for quantization in both directions
pub const PCM_FULL_SCALE: f64 = 32767.0;
