// BERT pair: PN generator (Tx) and self-synchronizing checker (Rx)

pub mod checker;
pub mod config;
pub mod generator;
pub mod stats;

pub use checker::{Checker, SyncState};
pub use config::CheckerConfig;
pub use generator::Generator;
pub use stats::BertStats;
