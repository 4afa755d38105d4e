use crate::config::SymbolTiming;
use crate::error::{ModemError, Result};
use std::f64::consts::PI;

/// Sampled waveform with its time axis (`time[i] = i / sample_rate`)
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f64>,
    pub time: Vec<f64>,
    pub sample_rate: f64,
}

impl Waveform {
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        let time = time_axis(samples.len(), sample_rate);
        Self {
            samples,
            time,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Split into `(samples, time)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.samples, self.time)
    }
}

pub fn time_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / sample_rate).collect()
}

/// How the instantaneous phase is derived from the per-sample frequency.
///
/// The two implementations are the only difference between FSK and CPFSK.
pub trait PhaseStrategy {
    fn name(&self) -> &'static str;

    /// Instantaneous phase (radians) for every sample
    fn phase_trajectory(&self, frequencies: &[f64], sample_rate: f64) -> Vec<f64>;
}

/// Phase recomputed from absolute time with the current symbol's frequency.
///
/// Jumps at symbol boundaries whenever the frequency changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscontinuousPhase;

impl PhaseStrategy for DiscontinuousPhase {
    fn name(&self) -> &'static str {
        "fsk"
    }

    fn phase_trajectory(&self, frequencies: &[f64], sample_rate: f64) -> Vec<f64> {
        frequencies
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let t = i as f64 / sample_rate;
                2.0 * PI * freq * t
            })
            .collect()
    }
}

/// Phase integrated sample by sample: `φ(i) = Σ_{k≤i} 2π f(k) / sample_rate`.
///
/// The accumulator carries across symbol boundaries, so the only change
/// between two samples is the increment of the new frequency. The sum is
/// strictly left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuousPhase;

impl PhaseStrategy for ContinuousPhase {
    fn name(&self) -> &'static str {
        "cpfsk"
    }

    fn phase_trajectory(&self, frequencies: &[f64], sample_rate: f64) -> Vec<f64> {
        let cycle = 2.0 * PI / sample_rate;
        frequencies
            .iter()
            .scan(0.0f64, |phase, &freq| {
                *phase += freq * cycle;
                Some(*phase)
            })
            .collect()
    }
}

/// Hold each symbol frequency for `samples_per_symbol` samples
pub fn expand_symbols(
    symbol_frequencies: &[f64],
    samples_per_symbol: usize,
) -> Result<Vec<f64>> {
    let total = symbol_frequencies
        .len()
        .checked_mul(samples_per_symbol)
        .ok_or(ModemError::SignalTooLong {
            symbols: symbol_frequencies.len(),
            samples_per_symbol,
        })?;

    let mut frequencies = Vec::with_capacity(total);
    for &freq in symbol_frequencies {
        frequencies.resize(frequencies.len() + samples_per_symbol, freq);
    }
    Ok(frequencies)
}

/// Build the waveform `sin(φ(i))` for a per-symbol frequency sequence
pub fn synthesize(
    strategy: &dyn PhaseStrategy,
    symbol_frequencies: &[f64],
    timing: &SymbolTiming,
    sample_rate: f64,
) -> Result<Waveform> {
    let frequencies = expand_symbols(symbol_frequencies, timing.samples_per_symbol)?;
    let samples = strategy
        .phase_trajectory(&frequencies, sample_rate)
        .into_iter()
        .map(f64::sin)
        .collect();

    Ok(Waveform::new(samples, sample_rate))
}
