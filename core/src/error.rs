use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Carrier frequencies must differ (freq0 = freq1 = {0} Hz)")]
    IdenticalCarriers(f64),

    #[error("Sampling rate {sample_rate} Hz is below baud rate {baud_rate} Hz")]
    SymbolTooShort { sample_rate: f64, baud_rate: f64 },

    #[error("Signal too long: {symbols} symbols of {samples_per_symbol} samples")]
    SignalTooLong {
        symbols: usize,
        samples_per_symbol: usize,
    },

    #[error("Unsupported audio format: {0}")]
    UnsupportedAudio(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, ModemError>;
