//! Quote calculation
//!
//! Prices are drawn uniformly from the product's band. The user is passed
//! along so a calculator may price per customer, but the random calculator
//! does not use it.

use rand::Rng;
use rust_decimal::Decimal;

use core_kernel::UserName;
use crate::product::InsuranceType;

/// Produces a monthly price for a user and product
pub trait QuoteCalculator: Send + Sync {
    /// Calculates the monthly amount for `insurance_type`
    fn calculate_quote(&self, user_name: &UserName, insurance_type: InsuranceType) -> Decimal;
}

/// Draws a whole-unit price from the product's band on every call
///
/// Each draw goes through the thread-local generator, which is seeded from
/// the operating system, so consecutive quotes are independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomQuoteCalculator;

impl RandomQuoteCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl QuoteCalculator for RandomQuoteCalculator {
    fn calculate_quote(&self, _user_name: &UserName, insurance_type: InsuranceType) -> Decimal {
        let amount = rand::rng().random_range(insurance_type.price_range());
        Decimal::from(amount)
    }
}
