// PN sequence engine shared by the generator and the checker

pub mod engine;
pub mod polynomial;

pub use engine::PnEngine;
pub use polynomial::{MAX_ORDER, MIN_ORDER, PnPattern, Polynomial};
