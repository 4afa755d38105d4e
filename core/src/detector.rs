use crate::config::{FrequencyAssignment, ModemConfig};
use crate::error::Result;
use std::f64::consts::PI;

/// Correlation magnitudes of one symbol window against both carriers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolScore {
    pub mag0: f64,
    pub mag1: f64,
}

impl SymbolScore {
    /// Hard decision: 0 only if the `freq0` magnitude is strictly larger.
    /// Equal magnitudes (e.g. a silent window) decode as 1.
    pub fn bit(&self) -> u8 {
        if self.mag0 > self.mag1 {
            0
        } else {
            1
        }
    }
}

/// In-phase and quadrature reference tones over one symbol
struct ReferenceTone {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl ReferenceTone {
    fn new(freq: f64, samples_per_symbol: usize, sample_rate: f64) -> Self {
        let (cos, sin) = (0..samples_per_symbol)
            .map(|k| {
                let t = k as f64 / sample_rate;
                let angle = 2.0 * PI * freq * t;
                (angle.cos(), angle.sin())
            })
            .unzip();
        Self { cos, sin }
    }

    /// `sqrt(I² + Q²)` with `I = Σ x·cos`, `Q = Σ x·sin`
    fn magnitude(&self, window: &[f64]) -> f64 {
        let (i, q) = window
            .iter()
            .zip(self.cos.iter().zip(self.sin.iter()))
            .fold((0.0f64, 0.0f64), |(i, q), (&x, (&c, &s))| {
                (i + x * c, q + x * s)
            });
        (i * i + q * q).sqrt()
    }
}

/// Non-coherent quadrature correlator for one symbol window.
///
/// Needs no carrier phase, so it decodes both the FSK and the CPFSK
/// waveform. The local time axis `k / sample_rate` is the same for every
/// window, so the reference tones are computed once.
pub struct SymbolCorrelationDetector {
    carriers: FrequencyAssignment,
    samples_per_symbol: usize,
    tone0: ReferenceTone,
    tone1: ReferenceTone,
}

impl SymbolCorrelationDetector {
    pub fn new(config: &ModemConfig) -> Result<Self> {
        let timing = config.timing()?;
        let spp = timing.samples_per_symbol;
        Ok(Self {
            carriers: config.carriers,
            samples_per_symbol: spp,
            tone0: ReferenceTone::new(config.carriers.freq0, spp, config.sample_rate),
            tone1: ReferenceTone::new(config.carriers.freq1, spp, config.sample_rate),
        })
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    pub fn carriers(&self) -> &FrequencyAssignment {
        &self.carriers
    }

    /// Correlate a window against both carriers.
    ///
    /// A window of the wrong length is correlated over the overlap with the
    /// reference tones only.
    pub fn score(&self, window: &[f64]) -> SymbolScore {
        SymbolScore {
            mag0: self.tone0.magnitude(window),
            mag1: self.tone1.magnitude(window),
        }
    }

    pub fn detect(&self, window: &[f64]) -> u8 {
        self.score(window).bit()
    }
}
