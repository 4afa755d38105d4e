mod error;
mod options;
mod server;

use clap::{Parser, Subcommand};
use error::CliError;
use fskmodem_core::transport::{demodulate_wav, from_base64, modulate_to_wav, to_base64};
use fskmodem_core::{
    audio_base64_to_bytes, bytes_to_audio_base64, Demodulator, ModemConfig, Modulation, Modulator,
};
use options::{ModemArgs, Mode};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fskmodem")]
#[command(about = "Binary FSK / CPFSK audio modem")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Modulate a binary file into a WAV audio file
    Modulate {
        /// Input binary file
        #[arg(value_name = "INPUT.BIN")]
        input: PathBuf,

        /// Output WAV file (Base64 text with --base64)
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Phase behaviour at symbol boundaries
        #[arg(short, long, value_enum, default_value_t = Mode::Fsk)]
        mode: Mode,

        /// Write the WAV container as Base64 text
        #[arg(long)]
        base64: bool,

        #[command(flatten)]
        modem: ModemArgs,
    },

    /// Demodulate a WAV audio file back to binary data
    Demodulate {
        /// Input WAV file (Base64 text with --base64)
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Output binary file
        #[arg(value_name = "OUTPUT.BIN")]
        output: PathBuf,

        /// Read the WAV container as Base64 text
        #[arg(long)]
        base64: bool,

        #[command(flatten)]
        modem: ModemArgs,
    },

    /// Run a message through both modulations and the Base64 WAV wrapper
    Roundtrip {
        /// Message to send
        #[arg(long, default_value = "Hello FSK!")]
        message: String,

        #[command(flatten)]
        modem: ModemArgs,
    },

    /// Serve the modem over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fskmodem=info,fskmodem_core=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Modulate { input, output, mode, base64, modem } => {
            modulate_command(&input, &output, mode.into(), base64, modem.into())?
        }
        Commands::Demodulate { input, output, base64, modem } => {
            demodulate_command(&input, &output, base64, modem.into())?
        }
        Commands::Roundtrip { message, modem } => return roundtrip_command(&message, modem.into()),
        Commands::Serve { addr } => server::serve(addr).await?,
    }
    Ok(ExitCode::SUCCESS)
}

fn modulate_command(
    input_path: &Path,
    output_path: &Path,
    modulation: Modulation,
    base64: bool,
    config: ModemConfig,
) -> Result<(), CliError> {
    let modulator = Modulator::new(config, modulation)?;

    let data = std::fs::read(input_path).map_err(CliError::io(input_path))?;
    println!("Read {} bytes from {}", data.len(), input_path.display());

    let encoded = modulate_to_wav(&modulator, &data)?;
    println!(
        "Encoded {} samples with {} ({:.3} s)",
        encoded.samples, modulation, encoded.duration_secs
    );

    if base64 {
        let mut text = to_base64(&encoded.wav);
        text.push('\n');
        std::fs::write(output_path, text).map_err(CliError::io(output_path))?;
    } else {
        std::fs::write(output_path, &encoded.wav).map_err(CliError::io(output_path))?;
    }

    info!(path = %output_path.display(), bytes = encoded.wav.len(), "wrote audio");
    println!("Wrote {}", output_path.display());
    Ok(())
}

fn demodulate_command(
    input_path: &Path,
    output_path: &Path,
    base64: bool,
    config: ModemConfig,
) -> Result<(), CliError> {
    let demodulator = Demodulator::new(&config)?;

    let wav = if base64 {
        let text = std::fs::read_to_string(input_path).map_err(CliError::io(input_path))?;
        from_base64(&text)?
    } else {
        std::fs::read(input_path).map_err(CliError::io(input_path))?
    };

    let decoded = demodulate_wav(&demodulator, &wav)?;
    println!("Read {} samples from {}", decoded.samples, input_path.display());
    println!("Decoded {} bits ({} bytes)", decoded.bits, decoded.data.len());

    std::fs::write(output_path, &decoded.data).map_err(CliError::io(output_path))?;
    println!("Wrote {}", output_path.display());
    Ok(())
}

fn roundtrip_command(message: &str, config: ModemConfig) -> Result<ExitCode, CliError> {
    println!("Original: {:?}", message);
    let mut all_ok = true;

    for modulation in [Modulation::Fsk, Modulation::Cpfsk] {
        let audio = bytes_to_audio_base64(message.as_bytes(), modulation, &config)?;
        let recovered = audio_base64_to_bytes(&audio, &config)?;
        let ok = recovered == message.as_bytes();
        all_ok &= ok;

        println!(
            "{}: {} Base64 chars, recovered {:?} [{}]",
            modulation,
            audio.len(),
            String::from_utf8_lossy(&recovered),
            if ok { "OK" } else { "MISMATCH" }
        );
    }

    Ok(if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
