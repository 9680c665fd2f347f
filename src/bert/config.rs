use crate::error::BertError;
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};

/// Acquisition and sync-loss policy of a `Checker`.
///
/// Acquisition locks once `order + confirmation_bits` consecutive received
/// bits follow the PN recurrence with at most `acquisition_tolerance`
/// mismatches. The trial lock then has to predict the next `probation_bits`
/// with at most `probation_tolerance` mismatches before the checker reports
/// sync; a failed trial is dropped without counting anything. Sync is lost
/// when more than `loss_threshold` of the last `loss_window_bits` synced bits
/// mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// `None` resolves to `max(order, MIN_CONFIRMATION_BITS)`
    pub confirmation_bits: Option<u32>,
    pub acquisition_tolerance: u32,
    /// 0 reports sync as soon as the window matches
    pub probation_bits: u32,
    pub probation_tolerance: u32,
    pub loss_window_bits: u32,
    pub loss_threshold: u32,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            confirmation_bits: None,
            acquisition_tolerance: DEFAULT_ACQUISITION_TOLERANCE,
            probation_bits: DEFAULT_PROBATION_BITS,
            probation_tolerance: DEFAULT_PROBATION_TOLERANCE,
            loss_window_bits: DEFAULT_LOSS_WINDOW_BITS,
            loss_threshold: DEFAULT_LOSS_THRESHOLD,
        }
    }
}

impl CheckerConfig {
    pub fn confirmation_bits_for(&self, order: u32) -> u32 {
        self.confirmation_bits
            .unwrap_or(order.max(MIN_CONFIRMATION_BITS))
    }

    pub fn validate(&self, order: u32) -> Result<(), BertError> {
        let confirmation = self.confirmation_bits_for(order);
        if confirmation == 0 {
            return Err(BertError::InvalidConfig(
                "confirmation_bits must be at least 1".into(),
            ));
        }
        if order + confirmation > WINDOW_CAPACITY_BITS {
            return Err(BertError::InvalidConfig(format!(
                "order {} + confirmation_bits {} exceeds the {}-bit acquisition window",
                order, confirmation, WINDOW_CAPACITY_BITS
            )));
        }
        if self.acquisition_tolerance >= confirmation {
            return Err(BertError::InvalidConfig(format!(
                "acquisition_tolerance {} must be below confirmation_bits {}",
                self.acquisition_tolerance, confirmation
            )));
        }
        if self.probation_bits > 0 && self.probation_tolerance >= self.probation_bits {
            return Err(BertError::InvalidConfig(format!(
                "probation_tolerance {} must be below probation_bits {}",
                self.probation_tolerance, self.probation_bits
            )));
        }
        if self.probation_tolerance > self.loss_threshold {
            return Err(BertError::InvalidConfig(format!(
                "probation_tolerance {} would pass locks that lose sync at once (loss_threshold {})",
                self.probation_tolerance, self.loss_threshold
            )));
        }
        if self.loss_window_bits == 0 || self.loss_window_bits > WINDOW_CAPACITY_BITS {
            return Err(BertError::InvalidConfig(format!(
                "loss_window_bits must be within 1..={}",
                WINDOW_CAPACITY_BITS
            )));
        }
        if self.loss_threshold >= self.loss_window_bits {
            return Err(BertError::InvalidConfig(format!(
                "loss_threshold {} can never be exceeded in a {}-bit window",
                self.loss_threshold, self.loss_window_bits
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, BertError> {
        serde_json::from_str(json).map_err(|e| BertError::InvalidConfig(e.to_string()))
    }
}
