pub mod bert;
pub mod bits;
pub mod channel;
pub mod error;
pub mod pn;
pub mod ui;
pub mod utils;

pub use bert::{BertStats, Checker, CheckerConfig, Generator, SyncState};
pub use error::BertError;
pub use pn::{PnEngine, PnPattern};
