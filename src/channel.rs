// Channel impairments applied between the generator and the checker
use crate::bits::flip_bit;
use crate::error::BertError;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub struct Channel {
    rng: StdRng,
    ber: f64,
    flipped: u64,
}

impl Channel {
    /// Noise-free channel; `burst` still draws from the seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ber: 0.0,
            flipped: 0,
        }
    }

    pub fn with_ber(seed: u64, ber: f64) -> Result<Self, BertError> {
        if !(0.0..=1.0).contains(&ber) {
            return Err(BertError::InvalidConfig(format!(
                "bit error ratio {} is not a probability",
                ber
            )));
        }
        let mut channel = Self::new(seed);
        channel.ber = ber;
        Ok(channel)
    }

    /// Flips every bit independently with probability `ber`.
    /// Returns the number of bits flipped in this buffer.
    pub fn apply_noise(&mut self, buffer: &mut [u8]) -> u64 {
        if self.ber == 0.0 {
            return 0;
        }
        let mut flipped = 0;
        for bit_index in 0..buffer.len() * 8 {
            if self.rng.random_bool(self.ber) {
                flip_bit(buffer, bit_index);
                flipped += 1;
            }
        }
        self.flipped += flipped;
        flipped
    }

    /// Replaces the span with bytes uncorrelated to any PN sequence
    pub fn burst(&mut self, span: &mut [u8]) {
        self.rng.fill(span);
    }

    /// Total bits flipped by `apply_noise`
    pub fn flipped(&self) -> u64 {
        self.flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_free_channel_is_transparent() {
        let mut channel = Channel::new(7);
        let mut buf = [0x5Au8; 64];
        assert_eq!(channel.apply_noise(&mut buf), 0);
        assert_eq!(buf, [0x5Au8; 64]);
    }

    #[test]
    fn test_flip_count_matches_difference() {
        let mut channel = Channel::with_ber(42, 0.01).unwrap();
        let clean = [0u8; 4096];
        let mut buf = clean;
        let flipped = channel.apply_noise(&mut buf);
        let differing: u32 = buf
            .iter()
            .zip(clean.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        assert_eq!(differing as u64, flipped);
        assert_eq!(channel.flipped(), flipped);
        // 32768 bits at 1 %: far from zero and far from everything
        assert!(flipped > 100 && flipped < 1000);
    }

    #[test]
    fn test_same_seed_same_impairment() {
        let mut a = Channel::with_ber(3, 0.05).unwrap();
        let mut b = Channel::with_ber(3, 0.05).unwrap();
        let mut buf_a = [0u8; 256];
        let mut buf_b = [0u8; 256];
        a.apply_noise(&mut buf_a);
        b.apply_noise(&mut buf_b);
        a.burst(&mut buf_a[10..20]);
        b.burst(&mut buf_b[10..20]);
        assert_eq!(buf_a, buf_b);
    }

    #[test]
    fn test_rejects_invalid_ber() {
        assert!(Channel::with_ber(0, -0.1).is_err());
        assert!(Channel::with_ber(0, 1.5).is_err());
        assert!(Channel::with_ber(0, f64::NAN).is_err());
    }
}
