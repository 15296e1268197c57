//! Test Data Builders
//!
//! Builders let tests state only the fields they care about.

use core_kernel::UserName;
use domain_insurance::{InsuranceType, Quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::UserFixtures;

/// Builder for quotes as a client would submit them
pub struct QuoteBuilder {
    user_name: UserName,
    insurance_type: InsuranceType,
    amount_per_month: Decimal,
}

impl Default for QuoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteBuilder {
    /// Creates a builder for a House quote at 50 per month for a new customer
    pub fn new() -> Self {
        Self {
            user_name: UserFixtures::new_customer(),
            insurance_type: InsuranceType::House,
            amount_per_month: dec!(50),
        }
    }

    /// Sets the user named in the quote
    pub fn user(mut self, user_name: UserName) -> Self {
        self.user_name = user_name;
        self
    }

    /// Sets the product
    pub fn insurance_type(mut self, insurance_type: InsuranceType) -> Self {
        self.insurance_type = insurance_type;
        self
    }

    /// Sets the submitted monthly amount
    pub fn amount(mut self, amount_per_month: Decimal) -> Self {
        self.amount_per_month = amount_per_month;
        self
    }

    /// Builds the quote
    pub fn build(self) -> Quote {
        Quote::new(self.user_name, self.insurance_type, self.amount_per_month)
    }
}
