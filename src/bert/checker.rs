// PN pattern checker (Rx side of the BERT pair)
use super::config::CheckerConfig;
use super::stats::BertStats;
use crate::bits::iter_bits;
use crate::error::BertError;
use crate::pn::{PnEngine, PnPattern, Polynomial};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    Acquiring,
    Synced,
}

/// Trial lock still being verified before it counts as sync
#[derive(Clone, Copy, Debug, Default)]
struct Probation {
    bits: u32,
    errors: u32,
}

pub struct Checker {
    poly: Polynomial,
    config: CheckerConfig,
    state: SyncState,

    // Live predictor, only meaningful while synced or on probation
    engine: PnEngine,
    probation: Option<Probation>,

    // Acquisition window: last `order + confirmation` raw bits, newest in bit 0
    window: u128,
    window_len: u32,
    window_cap: u32,

    // Mismatch flags of the trailing synced bits, newest in bit 0
    loss_window: u128,
    loss_window_len: u32,
    loss_window_errors: u32,

    bits_rx: u64,
    bits_rx_in_sync: u64,
    errors: u64,
    sync_loss_count: u64,
}

impl Checker {
    pub fn new(order: u32) -> Result<Self, BertError> {
        Self::with_config(order, CheckerConfig::default())
    }

    pub fn with_config(order: u32, config: CheckerConfig) -> Result<Self, BertError> {
        let poly = Polynomial::for_order(order)?;
        config.validate(order)?;
        Ok(Self::build(poly, config))
    }

    pub fn from_pattern(pattern: PnPattern) -> Self {
        // defaults are valid for every supported order
        Self::build(pattern.polynomial(), CheckerConfig::default())
    }

    fn build(poly: Polynomial, config: CheckerConfig) -> Self {
        Self {
            poly,
            config,
            state: SyncState::Acquiring,
            engine: PnEngine::new(poly),
            probation: None,
            window: 0,
            window_len: 0,
            window_cap: poly.order() + config.confirmation_bits_for(poly.order()),
            loss_window: 0,
            loss_window_len: 0,
            loss_window_errors: 0,
            bits_rx: 0,
            bits_rx_in_sync: 0,
            errors: 0,
            sync_loss_count: 0,
        }
    }

    /// Checks the next buffer of the received stream (MSB first)
    pub fn check(&mut self, buffer: &[u8]) {
        if buffer.is_empty() {
            return;
        }
        for bit in iter_bits(buffer) {
            self.check_bit(bit);
        }
        trace!(
            "PN{} check: {} bytes, state {:?}, {} bits / {} errors",
            self.poly.order(),
            buffer.len(),
            self.state,
            self.bits_rx,
            self.errors
        );
    }

    /// Bit-granular entry point for streams not aligned to bytes
    pub fn check_bits(&mut self, bits: impl IntoIterator<Item = u8>) {
        for bit in bits {
            self.check_bit(bit);
        }
    }

    pub fn check_bit(&mut self, bit: u8) {
        let bit = bit & 1;
        self.bits_rx += 1;
        match self.state {
            SyncState::Acquiring if self.probation.is_some() => self.verify(bit),
            SyncState::Acquiring => self.acquire(bit),
            SyncState::Synced => self.track(bit),
        }
    }

    fn acquire(&mut self, bit: u8) {
        self.window = (self.window << 1) | bit as u128;
        if self.window_len < self.window_cap {
            self.window_len += 1;
            if self.window_len < self.window_cap {
                return;
            }
        }

        if let Some(engine) = self.try_lock() {
            self.engine = engine;
            self.clear_loss_window();
            if self.config.probation_bits == 0 {
                self.declare_sync();
            } else {
                self.probation = Some(Probation::default());
            }
        }
    }

    /// Runs a trial lock for `probation_bits`. Surviving bits and their
    /// mismatches are counted as synced once it passes; a rejected trial
    /// leaves no trace in the counters.
    fn verify(&mut self, bit: u8) {
        let mismatch = self.engine.next_bit() != bit;
        self.push_loss_flag(mismatch);

        let Some(probation) = self.probation.as_mut() else {
            return;
        };
        probation.bits += 1;
        probation.errors += mismatch as u32;

        if probation.errors > self.config.probation_tolerance {
            trace!(
                "PN{} trial lock rejected after {} bits",
                self.poly.order(),
                probation.bits
            );
            self.probation = None;
            self.window = 0;
            self.window_len = 0;
            self.clear_loss_window();
        } else if probation.bits == self.config.probation_bits {
            let Probation { bits, errors } = *probation;
            self.probation = None;
            self.bits_rx_in_sync += bits as u64;
            self.errors += errors as u64;
            self.declare_sync();
        }
    }

    fn declare_sync(&mut self) {
        self.state = SyncState::Synced;
        debug!(
            "PN{} acquired after {} bits (sync losses so far: {})",
            self.poly.order(),
            self.bits_rx,
            self.sync_loss_count
        );
    }

    /// Seeds a trial engine from the oldest `order` window bits and verifies
    /// it against the rest of the window. On success the returned engine
    /// predicts the bit following the window.
    fn try_lock(&self) -> Option<PnEngine> {
        let order = self.poly.order();
        let observed = |age: u32| ((self.window >> (self.window_cap - 1 - age)) & 1) as u8;

        // an all-zero seed is rejected, so zero-filled input never locks
        let mut trial = PnEngine::from_bits(self.poly, (0..order).map(observed)).ok()?;
        trial.advance(order as usize);

        let mut mismatches = 0;
        for age in order..self.window_cap {
            if trial.next_bit() != observed(age) {
                mismatches += 1;
                if mismatches > self.config.acquisition_tolerance {
                    return None;
                }
            }
        }
        Some(trial)
    }

    fn track(&mut self, bit: u8) {
        let expected = self.engine.next_bit();
        self.bits_rx_in_sync += 1;

        let mismatch = expected != bit;
        if mismatch {
            self.errors += 1;
        }
        self.push_loss_flag(mismatch);

        if self.loss_window_errors > self.config.loss_threshold {
            self.lose_sync();
        }
    }

    fn push_loss_flag(&mut self, mismatch: bool) {
        let width = self.config.loss_window_bits;
        if self.loss_window_len == width {
            let leaving = (self.loss_window >> (width - 1)) & 1;
            self.loss_window_errors -= leaving as u32;
        } else {
            self.loss_window_len += 1;
        }
        self.loss_window = (self.loss_window << 1) | mismatch as u128;
        self.loss_window_errors += mismatch as u32;
    }

    fn lose_sync(&mut self) {
        self.sync_loss_count += 1;
        warn!(
            "PN{} sync lost at bit {}: {} errors in the last {} bits",
            self.poly.order(),
            self.bits_rx,
            self.loss_window_errors,
            self.loss_window_len
        );
        self.state = SyncState::Acquiring;
        self.window = 0;
        self.window_len = 0;
        self.clear_loss_window();
    }

    fn clear_loss_window(&mut self) {
        self.loss_window = 0;
        self.loss_window_len = 0;
        self.loss_window_errors = 0;
    }

    /// Clear all counters and start acquiring again
    pub fn reset(&mut self) {
        *self = Self::build(self.poly, self.config);
    }

    pub fn bits_rx(&self) -> u64 {
        self.bits_rx
    }

    pub fn bits_rx_in_sync(&self) -> u64 {
        self.bits_rx_in_sync
    }

    pub fn errors(&self) -> u64 {
        self.errors
    }

    pub fn synced(&self) -> bool {
        self.state == SyncState::Synced
    }

    pub fn sync_loss_count(&self) -> u64 {
        self.sync_loss_count
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn order(&self) -> u32 {
        self.poly.order()
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn bit_error_ratio(&self) -> f64 {
        self.stats().bit_error_ratio()
    }

    pub fn stats(&self) -> BertStats {
        BertStats {
            order: self.poly.order(),
            bits_rx: self.bits_rx,
            bits_rx_in_sync: self.bits_rx_in_sync,
            errors: self.errors,
            synced: self.synced(),
            sync_loss_count: self.sync_loss_count,
        }
    }
}
