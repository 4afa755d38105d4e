//! HTTP front end for the modem
//!
//! Payloads and audio travel as Base64 so requests stay plain JSON.

use crate::error::{ApiError, CliError};
use crate::options::Mode;
use axum::routing::{get, post};
use axum::{Json, Router};
use fskmodem_core::transport::{demodulate_wav, from_base64, modulate_to_wav, to_base64};
use fskmodem_core::{DecodedPayload, Demodulator, ModemConfig, ModemError, Modulation, Modulator};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

/// Largest waveform a single modulate request may produce
pub const MAX_OUTPUT_SAMPLES: usize = 1 << 25;

/// Optional overrides of the default modem parameters
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigBody {
    pub sample_rate: Option<f64>,
    pub baud_rate: Option<f64>,
    pub freq0: Option<f64>,
    pub freq1: Option<f64>,
}

impl ConfigBody {
    fn resolve(&self) -> ModemConfig {
        let defaults = ModemConfig::default();
        ModemConfig::new(
            self.sample_rate.unwrap_or(defaults.sample_rate),
            self.baud_rate.unwrap_or(defaults.baud_rate),
            self.freq0.unwrap_or(defaults.carriers.freq0),
            self.freq1.unwrap_or(defaults.carriers.freq1),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ModulateRequest {
    /// Base64 payload
    pub data: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub config: ConfigBody,
}

#[derive(Debug, Serialize)]
pub struct ModulateResponse {
    pub id: Uuid,
    pub mode: String,
    /// Base64 WAV container
    pub audio: String,
    pub samples: usize,
    pub duration_secs: f64,
}

#[derive(Debug, Deserialize)]
pub struct DemodulateRequest {
    /// Base64 WAV container
    pub audio: String,
    #[serde(default)]
    pub config: ConfigBody,
}

#[derive(Debug, Serialize)]
pub struct DemodulateResponse {
    pub id: Uuid,
    /// Base64 payload
    pub data: String,
    pub bits: usize,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/modulate", post(modulate))
        .route("/api/demodulate", post(demodulate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(addr: SocketAddr) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(CliError::Server)?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router())
        .await
        .map_err(CliError::Server)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn modulate(
    Json(request): Json<ModulateRequest>,
) -> Result<Json<ModulateResponse>, ApiError> {
    let id = Uuid::new_v4();
    let modulation: Modulation = request.mode.into();
    let modulator = Modulator::new(request.config.resolve(), modulation)?;
    let payload = from_base64(&request.data)?;

    let samples = modulator
        .timing()
        .total_samples(payload.len().saturating_mul(8))?;
    if samples > MAX_OUTPUT_SAMPLES {
        return Err(ApiError::TooLarge(format!(
            "{} samples requested, limit is {}",
            samples, MAX_OUTPUT_SAMPLES
        )));
    }

    // DSP runs off the async executor
    let encoded =
        tokio::task::spawn_blocking(move || modulate_to_wav(&modulator, &payload)).await??;

    info!(%id, mode = %modulation, samples = encoded.samples, "modulated payload");
    Ok(Json(ModulateResponse {
        id,
        mode: modulation.to_string(),
        audio: to_base64(&encoded.wav),
        samples: encoded.samples,
        duration_secs: encoded.duration_secs,
    }))
}

async fn demodulate(
    Json(request): Json<DemodulateRequest>,
) -> Result<Json<DemodulateResponse>, ApiError> {
    let id = Uuid::new_v4();
    let config = request.config.resolve();

    let decoded = tokio::task::spawn_blocking(move || -> Result<DecodedPayload, ModemError> {
        let demodulator = Demodulator::new(&config)?;
        let wav = from_base64(&request.audio)?;
        demodulate_wav(&demodulator, &wav)
    })
    .await??;

    info!(%id, bits = decoded.bits, "demodulated audio");
    Ok(Json(DemodulateResponse {
        id,
        data: to_base64(&decoded.data),
        bits: decoded.bits,
    }))
}
