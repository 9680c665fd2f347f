// Bit packing convention shared by generator and checker.
// MSB first: the earliest bit in time sits in bit 7 of the first byte.

/// Split a byte into its eight bits, MSB first
pub fn unpack_byte(byte: u8) -> [u8; 8] {
    std::array::from_fn(|i| (byte >> (7 - i)) & 1)
}

/// Pack up to eight bits, MSB first; missing low bits are zero
pub fn pack_byte(bits: &[u8]) -> u8 {
    (0..8).fold(0u8, |byte, i| {
        (byte << 1) | bits.get(i).map_or(0, |bit| bit & 1)
    })
}

/// Iterate the bits of a buffer in transmission order
pub fn iter_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| unpack_byte(byte))
}

/// Convert bytes to bit vector
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    iter_bits(bytes).collect()
}

/// Convert bit vector to bytes. A trailing partial byte is padded with zeros.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(pack_byte)
        .collect()
}

/// Drop the first `shift` bits of a buffer and repack. Only whole bytes are
/// returned, so the result is `shift / 8` or `shift / 8 + 1` bytes shorter.
pub fn shift_left(bytes: &[u8], shift: usize) -> Vec<u8> {
    let bits: Vec<u8> = iter_bits(bytes)
        .skip(shift)
        .collect();
    let whole = bits.len() / 8 * 8;
    bits_to_bytes(&bits[..whole])
}

/// Flip one bit, counted in transmission order from the buffer start
pub fn flip_bit(bytes: &mut [u8], bit_index: usize) {
    bytes[bit_index / 8] ^= 0x80 >> (bit_index % 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_conversion() {
        let byte = 0b10110011;
        let bits = unpack_byte(byte);
        assert_eq!(bits, [1, 0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(pack_byte(&bits), byte);
        assert_eq!(pack_byte(&[1, 0, 1]), 0b1010_0000);
        assert_eq!(pack_byte(&[]), 0);
    }

    #[test]
    fn test_bytes_bits_conversion() {
        let bytes = vec![0xAB, 0xCD, 0xEF];
        let bits = bytes_to_bits(&bytes);
        assert_eq!(bits.len(), 24);
        assert_eq!(&bits[..8], &unpack_byte(0xAB));
        let recovered = bits_to_bytes(&bits);
        assert_eq!(bytes, recovered);
    }

    #[test]
    fn test_partial_byte_is_padded() {
        assert_eq!(bits_to_bytes(&[1, 1, 1]), vec![0xE0]);
    }

    #[test]
    fn test_shift_left() {
        assert_eq!(shift_left(&[0x0F, 0xF0], 4), vec![0xFF]);
        assert_eq!(shift_left(&[0x12, 0x34, 0x56], 8), vec![0x34, 0x56]);
        assert!(shift_left(&[0xFF], 1).is_empty());
    }

    #[test]
    fn test_flip_bit() {
        let mut bytes = [0u8; 2];
        flip_bit(&mut bytes, 0);
        flip_bit(&mut bytes, 15);
        assert_eq!(bytes, [0x80, 0x01]);
        flip_bit(&mut bytes, 0);
        assert_eq!(bytes, [0x00, 0x01]);
    }
}
