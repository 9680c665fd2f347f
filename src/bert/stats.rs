use serde::{Deserialize, Serialize};

/// Snapshot of the checker counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BertStats {
    pub order: u32,
    pub bits_rx: u64,
    pub bits_rx_in_sync: u64,
    pub errors: u64,
    pub synced: bool,
    pub sync_loss_count: u64,
}

impl BertStats {
    /// Errors per bit checked in sync, 0.0 before the first synced bit
    pub fn bit_error_ratio(&self) -> f64 {
        if self.bits_rx_in_sync > 0 {
            self.errors as f64 / self.bits_rx_in_sync as f64
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for BertStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bits Input         : {}", self.bits_rx)?;
        writeln!(f, "Synced bits RX     : {}", self.bits_rx_in_sync)?;
        writeln!(f, "Synced bit errors  : {}", self.errors)?;
        writeln!(f, "Bit error ratio    : {:.3e}", self.bit_error_ratio())?;
        writeln!(f, "BERT synced?       : {}", self.synced)?;
        write!(f, "BERT sync loss cnt : {}", self.sync_loss_count)
    }
}
