use clap::{Args, ValueEnum};
use fskmodem_core::{
    ModemConfig, Modulation, DEFAULT_BAUD_RATE, DEFAULT_FREQ0, DEFAULT_FREQ1, DEFAULT_SAMPLE_RATE,
};
use serde::Deserialize;

/// Modem parameters shared by every subcommand
#[derive(Args, Debug, Clone, Copy)]
pub struct ModemArgs {
    /// Sampling rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: f64,

    /// Symbol rate in baud (symbols per second)
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud_rate: f64,

    /// Carrier frequency for bit 0 in Hz
    #[arg(long, default_value_t = DEFAULT_FREQ0)]
    pub freq0: f64,

    /// Carrier frequency for bit 1 in Hz
    #[arg(long, default_value_t = DEFAULT_FREQ1)]
    pub freq1: f64,
}

impl From<ModemArgs> for ModemConfig {
    fn from(args: ModemArgs) -> Self {
        ModemConfig::new(args.sample_rate, args.baud_rate, args.freq0, args.freq1)
    }
}

/// Modulation selected on the command line or in a request body
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Discontinuous-phase FSK
    #[default]
    Fsk,
    /// Continuous-phase FSK
    Cpfsk,
}

impl From<Mode> for Modulation {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Fsk => Modulation::Fsk,
            Mode::Cpfsk => Modulation::Cpfsk,
        }
    }
}
