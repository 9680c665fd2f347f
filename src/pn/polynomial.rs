// Maximal-length feedback polynomials, one per register order.
// Taps are listed highest first; the highest tap always equals the order.

use crate::error::BertError;
use serde::{Deserialize, Serialize};

pub const MIN_ORDER: u32 = 2;

/// Register width of `PnEngine`
pub const MAX_ORDER: u32 = 32;

/// Feedback taps for orders 2..=32 (Xilinx XAPP052 table)
const TAPS: [&[u32]; (MAX_ORDER - MIN_ORDER + 1) as usize] = [
    &[2, 1],
    &[3, 2],
    &[4, 3],
    &[5, 3],
    &[6, 5],
    &[7, 6],
    &[8, 6, 5, 4],
    &[9, 5],
    &[10, 7],
    &[11, 9],
    &[12, 6, 4, 1],
    &[13, 4, 3, 1],
    &[14, 5, 3, 1],
    &[15, 14],
    &[16, 15, 13, 4],
    &[17, 14],
    &[18, 11],
    &[19, 6, 2, 1],
    &[20, 17],
    &[21, 19],
    &[22, 21],
    &[23, 18],
    &[24, 23, 22, 17],
    &[25, 22],
    &[26, 6, 2, 1],
    &[27, 5, 2, 1],
    &[28, 25],
    &[29, 27],
    &[30, 6, 4, 1],
    &[31, 28],
    &[32, 22, 2, 1],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Polynomial {
    order: u32,
    taps: &'static [u32],
}

impl Polynomial {
    pub fn for_order(order: u32) -> Result<Self, BertError> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(BertError::invalid_order(order));
        }
        Ok(Self {
            order,
            taps: TAPS[(order - MIN_ORDER) as usize],
        })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn taps(&self) -> &'static [u32] {
        self.taps
    }

    /// Mask covering the `order` register bits
    pub fn mask(&self) -> u32 {
        u32::MAX >> (32 - self.order)
    }

    /// Sequence length before repeating: 2^order - 1
    pub fn period(&self) -> u64 {
        (1u64 << self.order) - 1
    }
}

/// Named test patterns (ITU-T O.150 lengths)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PnPattern {
    Pn7,
    Pn9,
    Pn11,
    Pn15,
    Pn20,
    Pn23,
    Pn31,
}

impl PnPattern {
    pub fn order(self) -> u32 {
        match self {
            PnPattern::Pn7 => 7,
            PnPattern::Pn9 => 9,
            PnPattern::Pn11 => 11,
            PnPattern::Pn15 => 15,
            PnPattern::Pn20 => 20,
            PnPattern::Pn23 => 23,
            PnPattern::Pn31 => 31,
        }
    }

    pub fn polynomial(self) -> Polynomial {
        // every named pattern is inside the tap table
        Polynomial {
            order: self.order(),
            taps: TAPS[(self.order() - MIN_ORDER) as usize],
        }
    }
}

impl std::fmt::Display for PnPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PN{}", self.order())
    }
}
