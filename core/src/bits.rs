/// Unpack bytes into bits, most significant bit first
pub fn bytes_to_bits(data: &[u8]) -> Vec<u8> {
    data.iter()
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// Pack bits back into bytes, most significant bit first
///
/// A trailing group shorter than 8 bits is zero-padded on the right.
/// Any nonzero bit value counts as 1.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk.iter().enumerate().fold(0u8, |acc, (i, &bit)| {
                if bit != 0 {
                    acc | (1 << (7 - i))
                } else {
                    acc
                }
            })
        })
        .collect()
}
