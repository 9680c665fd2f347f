use super::polynomial::Polynomial;
use crate::error::BertError;

/// Fibonacci LFSR shared by the generator and the checker.
///
/// Register bit `i` is the output `i` steps ahead, so bit 0 is the next bit
/// to come out. Each step shifts the register right by one and the feedback
/// (parity of the tapped bits) enters at bit `order - 1`. The produced
/// sequence satisfies `s[k] = s[k - t1] ^ s[k - t2] ^ ...` over the taps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PnEngine {
    poly: Polynomial,
    reg: u32,
    feedback_mask: u32,
}

impl PnEngine {
    /// Engine seeded with all ones
    pub fn new(poly: Polynomial) -> Self {
        let feedback_mask = poly
            .taps()
            .iter()
            .fold(0u32, |mask, &tap| mask | 1 << (poly.order() - tap));

        Self {
            poly,
            reg: poly.mask(),
            feedback_mask,
        }
    }

    pub fn with_seed(poly: Polynomial, seed: u32) -> Result<Self, BertError> {
        let mut engine = Self::new(poly);
        engine.reset(seed)?;
        Ok(engine)
    }

    /// Seeds the register from `order` bits given oldest first. The engine
    /// replays exactly those bits before continuing the sequence.
    pub fn from_bits(
        poly: Polynomial,
        bits: impl IntoIterator<Item = u8>,
    ) -> Result<Self, BertError> {
        let seed = bits
            .into_iter()
            .take(poly.order() as usize)
            .enumerate()
            .fold(0u32, |reg, (i, bit)| reg | ((bit & 1) as u32) << i);
        Self::with_seed(poly, seed)
    }

    pub fn reset(&mut self, seed: u32) -> Result<(), BertError> {
        let seed = seed & self.poly.mask();
        if seed == 0 {
            return Err(BertError::ZeroSeed {
                order: self.poly.order(),
            });
        }
        self.reg = seed;
        Ok(())
    }

    #[inline]
    pub fn next_bit(&mut self) -> u8 {
        let out = (self.reg & 1) as u8;
        let feedback = (self.reg & self.feedback_mask).count_ones() & 1;
        self.reg = (self.reg >> 1) | feedback << (self.poly.order() - 1);
        out
    }

    /// Next eight bits, first bit in the MSB
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        (0..8).fold(0u8, |byte, _| (byte << 1) | self.next_bit())
    }

    /// Next output without advancing
    pub fn predict(&self) -> u8 {
        (self.reg & 1) as u8
    }

    pub fn advance(&mut self, bits: usize) {
        for _ in 0..bits {
            self.next_bit();
        }
    }

    pub fn order(&self) -> u32 {
        self.poly.order()
    }

    pub fn register(&self) -> u32 {
        self.reg
    }

    pub fn polynomial(&self) -> Polynomial {
        self.poly
    }

    pub fn period(&self) -> u64 {
        self.poly.period()
    }
}

impl Iterator for PnEngine {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pn::PnPattern;

    fn engine(order: u32) -> PnEngine {
        PnEngine::new(Polynomial::for_order(order).unwrap())
    }

    #[test]
    fn test_period_is_maximal() {
        for order in 2..=16 {
            let mut pn = engine(order);
            let seed = pn.register();
            let period = pn.period();
            for step in 1..period {
                pn.next_bit();
                assert_ne!(pn.register(), seed, "PN{} repeated after {} bits", order, step);
                assert_ne!(pn.register(), 0);
            }
            pn.next_bit();
            assert_eq!(pn.register(), seed, "PN{} period is not {}", order, period);
        }
    }

    #[test]
    fn test_pn15_recurrence() {
        // x^15 + x^14 + 1: s[k] = s[k-15] ^ s[k-14]
        let bits: Vec<u8> = PnEngine::new(PnPattern::Pn15.polynomial())
            .take(200)
            .collect();
        assert!(bits[..15].iter().all(|&b| b == 1));
        for k in 15..bits.len() {
            assert_eq!(bits[k], bits[k - 15] ^ bits[k - 14]);
        }
    }

    #[test]
    fn test_balanced_output() {
        // a maximal sequence has 2^(n-1) ones per period
        let mut pn = engine(11);
        let ones: u32 = (0..pn.period()).map(|_| pn.next_bit() as u32).sum();
        assert_eq!(ones, 1 << 10);
    }

    #[test]
    fn test_from_bits_replays_seed() {
        let poly = PnPattern::Pn9.polynomial();
        let reference: Vec<u8> = PnEngine::new(poly).skip(37).take(60).collect();

        let trial = PnEngine::from_bits(poly, reference[..9].iter().copied()).unwrap();
        let replay: Vec<u8> = trial.take(60).collect();
        assert_eq!(replay, reference);
    }

    #[test]
    fn test_zero_seed_rejected() {
        let poly = Polynomial::for_order(7).unwrap();
        assert_eq!(
            PnEngine::with_seed(poly, 0).unwrap_err(),
            BertError::ZeroSeed { order: 7 }
        );
        // bits above the order are masked off before the check
        assert!(PnEngine::with_seed(poly, 0x80).is_err());
        assert!(PnEngine::from_bits(poly, [0u8; 7]).is_err());

        let mut pn = PnEngine::new(poly);
        let before = pn.register();
        assert!(pn.reset(0).is_err());
        assert_eq!(pn.register(), before);
    }

    #[test]
    fn test_next_byte_is_msb_first() {
        let poly = PnPattern::Pn15.polynomial();
        let mut by_bit = PnEngine::new(poly);
        let mut by_byte = PnEngine::new(poly);
        for _ in 0..64 {
            let expected = (0..8).fold(0u8, |acc, _| (acc << 1) | by_bit.next_bit());
            assert_eq!(by_byte.next_byte(), expected);
        }
    }

    #[test]
    fn test_predict_does_not_advance() {
        let mut pn = engine(23);
        pn.advance(100);
        let reg = pn.register();
        let predicted = pn.predict();
        assert_eq!(pn.register(), reg);
        assert_eq!(pn.next_bit(), predicted);
    }
}
