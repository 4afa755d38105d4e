use crate::config::ModemConfig;
use crate::detector::{SymbolCorrelationDetector, SymbolScore};
use crate::error::Result;
use log::debug;

/// FSK / CPFSK demodulator
///
/// Slices the waveform into consecutive, non-overlapping symbol windows and
/// makes one hard decision per window. The signal is assumed to be
/// symbol-aligned from its first sample.
pub struct Demodulator {
    config: ModemConfig,
    detector: SymbolCorrelationDetector,
}

impl Demodulator {
    pub fn new(config: &ModemConfig) -> Result<Self> {
        Ok(Self {
            config: *config,
            detector: SymbolCorrelationDetector::new(config)?,
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.detector.samples_per_symbol()
    }

    /// Number of complete symbols in `len` samples
    pub fn symbol_count(&self, len: usize) -> usize {
        len / self.samples_per_symbol()
    }

    /// Correlation scores for every complete symbol window
    pub fn scores(&self, samples: &[f64]) -> Vec<SymbolScore> {
        samples
            .chunks_exact(self.samples_per_symbol())
            .map(|window| self.detector.score(window))
            .collect()
    }

    /// Recover one bit per complete symbol window.
    ///
    /// Trailing samples that do not fill a whole window are dropped; this is
    /// not an error. Output length is `floor(samples.len() / samples_per_symbol)`.
    pub fn demodulate(&self, samples: &[f64]) -> Vec<u8> {
        let windows = samples.chunks_exact(self.samples_per_symbol());
        let leftover = windows.remainder().len();

        let bits: Vec<u8> = windows.map(|window| self.detector.detect(window)).collect();

        if leftover > 0 {
            debug!(
                "dropped {} trailing samples after {} complete symbols",
                leftover,
                bits.len()
            );
        }
        debug!("demodulated {} samples into {} bits", samples.len(), bits.len());

        bits
    }
}

/// Demodulate an FSK or CPFSK waveform back into bits
pub fn demodulate(samples: &[f64], config: &ModemConfig) -> Result<Vec<u8>> {
    Ok(Demodulator::new(config)?.demodulate(samples))
}
