use crate::config::FrequencyAssignment;

/// Map each bit to its carrier frequency (0 → `freq0`, nonzero → `freq1`)
pub fn map_frequencies(bits: &[u8], carriers: &FrequencyAssignment) -> Vec<f64> {
    bits.iter().map(|&bit| carriers.frequency_for(bit)).collect()
}
