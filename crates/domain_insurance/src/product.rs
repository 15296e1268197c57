//! Insurable products
//!
//! The product catalogue is a closed set. Each product carries the band its
//! monthly price is drawn from when the server calculates a quote.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Category of insurance a user can buy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsuranceType {
    /// Home and contents cover
    #[serde(alias = "house")]
    House,
    /// Pleasure craft cover
    #[serde(alias = "boat")]
    Boat,
    /// Private health cover
    #[serde(alias = "health")]
    Health,
}

impl InsuranceType {
    /// Every product, in catalogue order
    pub const ALL: [InsuranceType; 3] = [
        InsuranceType::House,
        InsuranceType::Boat,
        InsuranceType::Health,
    ];

    /// Whole-unit monthly price band, lower bound inclusive, upper bound exclusive
    pub fn price_range(&self) -> Range<i64> {
        match self {
            InsuranceType::House => 30..70,
            InsuranceType::Boat => 5..15,
            InsuranceType::Health => 79..150,
        }
    }

    /// Returns the product name as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            InsuranceType::House => "House",
            InsuranceType::Boat => "Boat",
            InsuranceType::Health => "Health",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
