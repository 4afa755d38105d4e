use crate::config::{ModemConfig, SymbolTiming};
use crate::error::Result;
use crate::mapper::map_frequencies;
use crate::synthesis::{synthesize, ContinuousPhase, DiscontinuousPhase, PhaseStrategy, Waveform};
use log::debug;

/// Binary FSK variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modulation {
    /// Phase recomputed from absolute time, jumps at symbol boundaries
    #[default]
    Fsk,
    /// Continuous-phase FSK
    Cpfsk,
}

impl Modulation {
    pub fn phase_strategy(&self) -> &'static dyn PhaseStrategy {
        match self {
            Modulation::Fsk => &DiscontinuousPhase,
            Modulation::Cpfsk => &ContinuousPhase,
        }
    }
}

impl std::fmt::Display for Modulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.phase_strategy().name())
    }
}

/// FSK / CPFSK modulator
///
/// Maps every bit to a carrier, holds it for one symbol and synthesizes the
/// samples with the phase strategy of the selected [`Modulation`].
/// Holds no state between calls.
pub struct Modulator {
    config: ModemConfig,
    timing: SymbolTiming,
    modulation: Modulation,
}

impl Modulator {
    pub fn new(config: ModemConfig, modulation: Modulation) -> Result<Self> {
        let timing = config.timing()?;
        Ok(Self {
            config,
            timing,
            modulation,
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    pub fn timing(&self) -> &SymbolTiming {
        &self.timing
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    /// Modulate a bit sequence (values 0/1, nonzero treated as 1).
    ///
    /// Output length is `bits.len() * samples_per_symbol`; a length that
    /// does not fit in `usize` is a [`SignalTooLong`](crate::ModemError::SignalTooLong).
    pub fn modulate(&self, bits: &[u8]) -> Result<Waveform> {
        self.timing.total_samples(bits.len())?;
        let symbol_frequencies = map_frequencies(bits, &self.config.carriers);
        let waveform = synthesize(
            self.modulation.phase_strategy(),
            &symbol_frequencies,
            &self.timing,
            self.config.sample_rate,
        )?;

        debug!(
            "{} modulated {} bits into {} samples ({} per symbol)",
            self.modulation,
            bits.len(),
            waveform.len(),
            self.timing.samples_per_symbol
        );

        Ok(waveform)
    }
}

/// Discontinuous-phase FSK modulation
pub fn modulate_fsk(bits: &[u8], config: &ModemConfig) -> Result<Waveform> {
    Modulator::new(*config, Modulation::Fsk)?.modulate(bits)
}

/// Continuous-phase FSK modulation
pub fn modulate_cpfsk(bits: &[u8], config: &ModemConfig) -> Result<Waveform> {
    Modulator::new(*config, Modulation::Cpfsk)?.modulate(bits)
}
