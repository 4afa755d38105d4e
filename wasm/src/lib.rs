use fskmodem_core::transport::{demodulate_wav, from_base64, modulate_to_wav, to_base64};
use fskmodem_core::{Demodulator, ModemConfig, ModemError, Modulation, Modulator};
use wasm_bindgen::prelude::*;

fn to_js(e: ModemError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// FSK / CPFSK modem for the browser.
///
/// Samples cross the boundary as `Float32Array`; processing stays in f64.
#[wasm_bindgen]
pub struct WasmModem {
    fsk: Modulator,
    cpfsk: Modulator,
    demodulator: Demodulator,
}

impl WasmModem {
    fn build(config: ModemConfig) -> Result<WasmModem, ModemError> {
        Ok(WasmModem {
            fsk: Modulator::new(config, Modulation::Fsk)?,
            cpfsk: Modulator::new(config, Modulation::Cpfsk)?,
            demodulator: Demodulator::new(&config)?,
        })
    }

    fn modulator(&self, continuous_phase: bool) -> &Modulator {
        if continuous_phase {
            &self.cpfsk
        } else {
            &self.fsk
        }
    }

    fn synthesize(&self, bits: &[u8], continuous_phase: bool) -> Result<Vec<f32>, ModemError> {
        let waveform = self.modulator(continuous_phase).modulate(bits)?;
        Ok(waveform.samples.into_iter().map(|s| s as f32).collect())
    }

    fn encode(&self, data: &[u8], continuous_phase: bool) -> Result<String, ModemError> {
        let encoded = modulate_to_wav(self.modulator(continuous_phase), data)?;
        Ok(to_base64(&encoded.wav))
    }

    fn decode(&self, audio: &str) -> Result<Vec<u8>, ModemError> {
        let wav = from_base64(audio)?;
        Ok(demodulate_wav(&self.demodulator, &wav)?.data)
    }
}

#[wasm_bindgen]
impl WasmModem {
    #[wasm_bindgen(constructor)]
    pub fn new(
        sample_rate: f64,
        baud_rate: f64,
        freq0: f64,
        freq1: f64,
    ) -> Result<WasmModem, JsValue> {
        WasmModem::build(ModemConfig::new(sample_rate, baud_rate, freq0, freq1)).map_err(to_js)
    }

    /// Modem with the default 44.1 kHz / 300 baud / 1200-2200 Hz settings
    #[wasm_bindgen(js_name = withDefaults)]
    pub fn with_defaults() -> Result<WasmModem, JsValue> {
        WasmModem::build(ModemConfig::default()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = samplesPerSymbol)]
    pub fn samples_per_symbol(&self) -> usize {
        self.demodulator.samples_per_symbol()
    }

    /// Modulate a bit array (one 0/1 per byte) into audio samples
    pub fn modulate(&self, bits: &[u8], continuous_phase: bool) -> Result<Vec<f32>, JsValue> {
        self.synthesize(bits, continuous_phase).map_err(to_js)
    }

    /// Recover one bit per complete symbol window
    pub fn demodulate(&self, samples: &[f32]) -> Vec<u8> {
        let samples: Vec<f64> = samples.iter().map(|&s| f64::from(s)).collect();
        self.demodulator.demodulate(&samples)
    }

    /// Bytes to a Base64 WAV container
    #[wasm_bindgen(js_name = encodeBytes)]
    pub fn encode_bytes(&self, data: &[u8], continuous_phase: bool) -> Result<String, JsValue> {
        self.encode(data, continuous_phase).map_err(to_js)
    }

    /// Base64 WAV container back to bytes
    #[wasm_bindgen(js_name = decodeAudio)]
    pub fn decode_audio(&self, audio: &str) -> Result<Vec<u8>, JsValue> {
        self.decode(audio).map_err(to_js)
    }
}
