//! Centralises the one place this crate crosses between big-endian byte
//! arrays (the public block/key I/O format) and [`Vob`] bit vectors (the
//! internal state representation). Bit index 0 is the most significant bit
//! of byte 0.

use vob::Vob;

/// Unpack a big-endian byte slice into a bit vector, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vob {
    let mut bits = Vob::from_elem(bytes.len() * 8, false);
    for (byte_index, byte) in bytes.iter().enumerate() {
        for bit_index in 0..8 {
            let bit = (byte >> (7 - bit_index)) & 1 == 1;
            bits.set(byte_index * 8 + bit_index, bit);
        }
    }
    bits
}

/// Pack a bit vector back into big-endian bytes, MSB first. `bits.len()`
/// must be a multiple of 8.
pub fn bits_to_bytes(bits: &Vob) -> Vec<u8> {
    assert_eq!(bits.len() % 8, 0);
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk_start in (0..bits.len()).step_by(8) {
        let mut byte = 0u8;
        for i in 0..8 {
            byte = (byte << 1) | (bits[chunk_start + i] as u8);
        }
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips() {
        let bytes = [0xAB, 0xFF, 0x00, 0x80];
        let bits = bytes_to_bits(&bytes);
        assert_eq!(bits_to_bytes(&bits), bytes.to_vec());
    }

    #[test]
    fn msb_first() {
        let bits = bytes_to_bits(&[0x80]);
        assert!(bits[0]);
        assert!(!bits[1]);
    }
}
