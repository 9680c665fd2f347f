use thiserror::Error;

use crate::pn::polynomial::{MAX_ORDER, MIN_ORDER};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BertError {
    #[error("PN order {order} is outside the supported range {min}..={max}")]
    InvalidOrder { order: u32, min: u32, max: u32 },
    #[error("all-zero seed is a fixed point of the PN{order} register")]
    ZeroSeed { order: u32 },
    #[error("invalid checker configuration: {0}")]
    InvalidConfig(String),
}

impl BertError {
    pub fn invalid_order(order: u32) -> Self {
        BertError::InvalidOrder {
            order,
            min: MIN_ORDER,
            max: MAX_ORDER,
        }
    }
}

impl From<BertError> for String {
    fn from(error: BertError) -> Self {
        error.to_string()
    }
}
