// PN pattern generator (Tx side of the BERT pair)
use crate::error::BertError;
use crate::pn::{PnEngine, PnPattern, Polynomial};
use tracing::trace;

pub struct Generator {
    engine: PnEngine,
    initial: PnEngine,
    bits_tx: u64,
}

impl Generator {
    /// Generator of the given order, register seeded with all ones
    pub fn new(order: u32) -> Result<Self, BertError> {
        let poly = Polynomial::for_order(order)?;
        Ok(Self::from_engine(PnEngine::new(poly)))
    }

    pub fn with_seed(order: u32, seed: u32) -> Result<Self, BertError> {
        let poly = Polynomial::for_order(order)?;
        Ok(Self::from_engine(PnEngine::with_seed(poly, seed)?))
    }

    pub fn from_pattern(pattern: PnPattern) -> Self {
        Self::from_engine(PnEngine::new(pattern.polynomial()))
    }

    fn from_engine(engine: PnEngine) -> Self {
        Self {
            initial: engine.clone(),
            engine,
            bits_tx: 0,
        }
    }

    /// Fills the buffer with the next `8 * buffer.len()` bits of the sequence
    pub fn fill(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.engine.next_byte();
        }
        self.bits_tx += 8 * buffer.len() as u64;
        trace!(
            "PN{} fill: {} bytes, {} bits sent",
            self.engine.order(),
            buffer.len(),
            self.bits_tx
        );
    }

    /// Restart the sequence from the construction seed
    pub fn reset(&mut self) {
        self.engine = self.initial.clone();
        self.bits_tx = 0;
    }

    pub fn bits_tx(&self) -> u64 {
        self.bits_tx
    }

    pub fn order(&self) -> u32 {
        self.engine.order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bytes_to_bits;

    #[test]
    fn test_identical_generators_agree() {
        let mut a = Generator::new(15).unwrap();
        let mut b = Generator::from_pattern(PnPattern::Pn15);
        let mut buf_a = [0u8; 333];
        let mut buf_b = [0u8; 333];
        for _ in 0..5 {
            a.fill(&mut buf_a);
            b.fill(&mut buf_b);
            assert_eq!(buf_a, buf_b);
        }
        assert_eq!(a.bits_tx(), 5 * 333 * 8);
    }

    #[test]
    fn test_fill_is_continuous_across_calls() {
        let mut whole = Generator::new(11).unwrap();
        let mut pieces = Generator::new(11).unwrap();

        let mut expected = vec![0u8; 100];
        whole.fill(&mut expected);

        let mut joined = Vec::new();
        for size in [1, 7, 0, 42, 50] {
            let mut chunk = vec![0u8; size];
            pieces.fill(&mut chunk);
            joined.extend_from_slice(&chunk);
        }
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_pn15_first_bytes() {
        // all-ones seed: fifteen 1s, then s[k] = s[k-15] ^ s[k-14] yields zeros
        let mut tx = Generator::from_pattern(PnPattern::Pn15);
        let mut buf = [0u8; 4];
        tx.fill(&mut buf);
        assert_eq!(buf[0], 0xFF);
        assert_eq!(buf[1], 0xFE);
        assert_eq!(buf[2], 0x00);
    }

    #[test]
    fn test_output_repeats_after_period() {
        // PN7 period is 127 bits; 127 bytes hold exactly 8 periods
        let mut tx = Generator::new(7).unwrap();
        let mut buf = vec![0u8; 127];
        tx.fill(&mut buf);
        let bits = bytes_to_bits(&buf);
        for k in 127..bits.len() {
            assert_eq!(bits[k], bits[k - 127]);
        }
        for shift in 1..127 {
            assert!((0..127).any(|k| bits[k] != bits[k + shift]));
        }
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut tx = Generator::with_seed(9, 0x1A5).unwrap();
        let mut first = [0u8; 16];
        let mut again = [0u8; 16];
        tx.fill(&mut first);
        tx.reset();
        assert_eq!(tx.bits_tx(), 0);
        tx.fill(&mut again);
        assert_eq!(first, again);
    }

    #[test]
    fn test_bad_construction() {
        assert!(matches!(
            Generator::new(0),
            Err(BertError::InvalidOrder { order: 0, .. })
        ));
        assert!(Generator::new(33).is_err());
        assert_eq!(
            Generator::with_seed(15, 0x8000).err(),
            Some(BertError::ZeroSeed { order: 15 })
        );
    }
}
