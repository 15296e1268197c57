//! Quote and policy value objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use core_kernel::UserName;
use crate::product::InsuranceType;

/// A proposed monthly price for a user and product
///
/// Quotes are transient: they travel between client and server and are
/// turned into an [`Insurance`] on purchase, never stored themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub user_name: UserName,
    pub insurance_type: InsuranceType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_per_month: Decimal,
}

impl Quote {
    pub fn new(user_name: UserName, insurance_type: InsuranceType, amount_per_month: Decimal) -> Self {
        Self {
            user_name,
            insurance_type,
            amount_per_month,
        }
    }

    /// Returns a copy owned by `user_name`
    pub fn for_user(self, user_name: UserName) -> Self {
        Self { user_name, ..self }
    }

    /// Returns a copy priced at `amount_per_month`
    pub fn with_amount(self, amount_per_month: Decimal) -> Self {
        Self {
            amount_per_month,
            ..self
        }
    }
}

/// An issued policy held by one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub insurance_type: InsuranceType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_per_month: Decimal,
}

impl Insurance {
    pub fn new(insurance_type: InsuranceType, amount_per_month: Decimal) -> Self {
        Self {
            insurance_type,
            amount_per_month,
        }
    }
}

impl From<&Quote> for Insurance {
    fn from(quote: &Quote) -> Self {
        Insurance::new(quote.insurance_type, quote.amount_per_month)
    }
}

/// Bounds on the monthly price a client may choose for itself
///
/// Prices inside the band are accepted as submitted. Anything outside it is
/// replaced by a server-side quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseLimits {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

impl PurchaseLimits {
    pub fn new(min_amount: Decimal, max_amount: Decimal) -> Self {
        Self {
            min_amount,
            max_amount,
        }
    }

    /// Returns true if a client-supplied amount is trusted verbatim
    pub fn accepts(&self, amount: Decimal) -> bool {
        self.range().contains(&amount)
    }

    /// Inclusive accepted range
    pub fn range(&self) -> RangeInclusive<Decimal> {
        self.min_amount..=self.max_amount
    }
}

impl Default for PurchaseLimits {
    fn default() -> Self {
        Self::new(Decimal::from(5), Decimal::from(150))
    }
}
