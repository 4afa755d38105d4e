use crate::error::{ModemError, Result};
use crate::{
    DEFAULT_BAUD_RATE, DEFAULT_FREQ0, DEFAULT_FREQ1, DEFAULT_SAMPLE_RATE, MAX_SAMPLES_PER_SYMBOL,
};
use log::warn;

/// Carrier pair: `freq0` encodes bit 0, `freq1` encodes bit 1 (Hz)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyAssignment {
    pub freq0: f64,
    pub freq1: f64,
}

impl FrequencyAssignment {
    pub fn new(freq0: f64, freq1: f64) -> Self {
        Self { freq0, freq1 }
    }

    /// Carrier for a bit value; any nonzero value selects `freq1`
    pub fn frequency_for(&self, bit: u8) -> f64 {
        if bit == 0 {
            self.freq0
        } else {
            self.freq1
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, freq) in [("freq0", self.freq0), ("freq1", self.freq1)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(ModemError::InvalidConfig(format!(
                    "{} must be a positive frequency, got {}",
                    name, freq
                )));
            }
        }
        if self.freq0 == self.freq1 {
            return Err(ModemError::IdenticalCarriers(self.freq0));
        }
        Ok(())
    }
}

impl Default for FrequencyAssignment {
    fn default() -> Self {
        Self::new(DEFAULT_FREQ0, DEFAULT_FREQ1)
    }
}

/// Samples per symbol and the resulting symbol duration
///
/// `samples_per_symbol = floor(sample_rate / baud_rate)`, so the effective
/// symbol duration can be slightly shorter than `1 / baud_rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolTiming {
    pub samples_per_symbol: usize,
    pub symbol_duration: f64,
}

impl SymbolTiming {
    pub fn new(sample_rate: f64, baud_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ModemError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        if !baud_rate.is_finite() || baud_rate <= 0.0 {
            return Err(ModemError::InvalidConfig(format!(
                "baud rate must be positive, got {}",
                baud_rate
            )));
        }

        let ratio = (sample_rate / baud_rate).floor();
        if ratio < 1.0 {
            return Err(ModemError::SymbolTooShort {
                sample_rate,
                baud_rate,
            });
        }
        if ratio > MAX_SAMPLES_PER_SYMBOL as f64 {
            return Err(ModemError::InvalidConfig(format!(
                "{} Hz / {} baud gives {} samples per symbol, limit is {}",
                sample_rate, baud_rate, ratio, MAX_SAMPLES_PER_SYMBOL
            )));
        }

        let samples_per_symbol = ratio as usize;

        Ok(Self {
            samples_per_symbol,
            symbol_duration: samples_per_symbol as f64 / sample_rate,
        })
    }

    /// Sample count of `symbols` consecutive symbols
    pub fn total_samples(&self, symbols: usize) -> Result<usize> {
        symbols
            .checked_mul(self.samples_per_symbol)
            .ok_or(ModemError::SignalTooLong {
                symbols,
                samples_per_symbol: self.samples_per_symbol,
            })
    }
}

/// Everything the modulator and demodulator need to agree on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    pub sample_rate: f64,
    pub baud_rate: f64,
    pub carriers: FrequencyAssignment,
}

impl ModemConfig {
    pub fn new(sample_rate: f64, baud_rate: f64, freq0: f64, freq1: f64) -> Self {
        Self {
            sample_rate,
            baud_rate,
            carriers: FrequencyAssignment::new(freq0, freq1),
        }
    }

    /// Check every parameter and derive the symbol timing
    pub fn timing(&self) -> Result<SymbolTiming> {
        self.carriers.validate()?;
        let timing = SymbolTiming::new(self.sample_rate, self.baud_rate)?;

        let nyquist = self.sample_rate / 2.0;
        for freq in [self.carriers.freq0, self.carriers.freq1] {
            if freq >= nyquist {
                warn!(
                    "carrier {} Hz is at or above Nyquist ({} Hz) and will alias",
                    freq, nyquist
                );
            }
        }

        Ok(timing)
    }

    pub fn validate(&self) -> Result<()> {
        self.timing().map(|_| ())
    }

    /// Sample rate as stored in a WAV header; fractional rates are truncated
    pub fn wav_sample_rate(&self) -> Result<u32> {
        if !(self.sample_rate >= 1.0 && self.sample_rate <= u32::MAX as f64) {
            return Err(ModemError::UnsupportedAudio(format!(
                "sample rate {} Hz cannot be stored in a WAV header",
                self.sample_rate
            )));
        }
        Ok(self.sample_rate as u32)
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            baud_rate: DEFAULT_BAUD_RATE,
            carriers: FrequencyAssignment::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = ModemConfig::default().timing().unwrap();
        assert_eq!(timing.samples_per_symbol, 147);
        assert!((timing.symbol_duration - 147.0 / 44100.0).abs() < 1e-15);
    }

    #[test]
    fn test_timing_floors_fractional_symbols() {
        // 8000 / 300 = 26.67 samples
        let timing = SymbolTiming::new(8000.0, 300.0).unwrap();
        assert_eq!(timing.samples_per_symbol, 26);
        assert!((timing.symbol_duration - 26.0 / 8000.0).abs() < 1e-15);
    }

    #[test]
    fn test_sample_rate_equal_to_baud_rate() {
        let timing = SymbolTiming::new(300.0, 300.0).unwrap();
        assert_eq!(timing.samples_per_symbol, 1);
    }

    #[test]
    fn test_sample_rate_below_baud_rate() {
        let result = SymbolTiming::new(100.0, 300.0);
        assert!(matches!(result, Err(ModemError::SymbolTooShort { .. })));
    }

    #[test]
    fn test_non_positive_rates() {
        assert!(matches!(
            SymbolTiming::new(0.0, 300.0),
            Err(ModemError::InvalidConfig(_))
        ));
        assert!(matches!(
            SymbolTiming::new(44100.0, -1.0),
            Err(ModemError::InvalidConfig(_))
        ));
        assert!(matches!(
            SymbolTiming::new(f64::NAN, 300.0),
            Err(ModemError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_oversized_symbols_rejected() {
        assert!(matches!(
            SymbolTiming::new(1e20, 1.0),
            Err(ModemError::InvalidConfig(_))
        ));
        assert!(matches!(
            SymbolTiming::new(1e15, 1.0),
            Err(ModemError::InvalidConfig(_))
        ));
        assert!(matches!(
            SymbolTiming::new(f64::MAX, f64::MIN_POSITIVE),
            Err(ModemError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_largest_symbol_accepted() {
        let timing = SymbolTiming::new(MAX_SAMPLES_PER_SYMBOL as f64, 1.0).unwrap();
        assert_eq!(timing.samples_per_symbol, MAX_SAMPLES_PER_SYMBOL);

        let result = SymbolTiming::new(MAX_SAMPLES_PER_SYMBOL as f64 + 1.0, 1.0);
        assert!(matches!(result, Err(ModemError::InvalidConfig(_))));
    }

    #[test]
    fn test_total_samples_overflow() {
        let timing = SymbolTiming::new(44100.0, 300.0).unwrap();
        assert_eq!(timing.total_samples(16).unwrap(), 16 * 147);
        assert!(matches!(
            timing.total_samples(usize::MAX),
            Err(ModemError::SignalTooLong { samples_per_symbol: 147, .. })
        ));
    }

    #[test]
    fn test_wav_sample_rate() {
        assert_eq!(ModemConfig::default().wav_sample_rate().unwrap(), 44100);
        assert_eq!(
            ModemConfig::new(8000.7, 100.0, 1000.0, 2000.0).wav_sample_rate().unwrap(),
            8000
        );
        for rate in [0.5, 5e9] {
            let config = ModemConfig::new(rate, 0.1, 0.01, 0.02);
            assert!(matches!(
                config.wav_sample_rate(),
                Err(ModemError::UnsupportedAudio(_))
            ));
        }
    }

    #[test]
    fn test_identical_carriers() {
        let config = ModemConfig::new(44100.0, 300.0, 1200.0, 1200.0);
        assert!(matches!(
            config.validate(),
            Err(ModemError::IdenticalCarriers(f)) if f == 1200.0
        ));
    }

    #[test]
    fn test_negative_carrier() {
        let config = ModemConfig::new(44100.0, 300.0, -1200.0, 2200.0);
        assert!(matches!(config.validate(), Err(ModemError::InvalidConfig(_))));
    }

    #[test]
    fn test_frequency_for_nonzero_bits() {
        let carriers = FrequencyAssignment::default();
        assert_eq!(carriers.frequency_for(0), 1200.0);
        assert_eq!(carriers.frequency_for(1), 2200.0);
        assert_eq!(carriers.frequency_for(7), 2200.0);
    }

    #[test]
    fn test_carrier_above_nyquist_is_accepted() {
        let config = ModemConfig::new(8000.0, 300.0, 1200.0, 5000.0);
        assert!(config.validate().is_ok());
    }
}
