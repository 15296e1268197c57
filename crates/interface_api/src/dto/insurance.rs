//! Insurance DTOs
//!
//! Field names follow the browser client's camelCase JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::UserName;
use domain_insurance::{Insurance, InsuranceType, Quote};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub insurance_type: InsuranceType,
}

/// Purchase request as submitted by the client
///
/// A missing amount counts as zero and so gets a server-side price. Any
/// `userName` the client sends is not read; the purchase belongs to the caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyInsuranceRequest {
    pub insurance_type: InsuranceType,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount_per_month: Decimal,
}

impl BuyInsuranceRequest {
    /// Converts to a domain quote owned by `caller`
    pub fn into_quote(self, caller: &UserName) -> Quote {
        Quote::new(caller.clone(), self.insurance_type, self.amount_per_month)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceResponse {
    pub insurance_type: InsuranceType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_per_month: Decimal,
}

impl From<Insurance> for InsuranceResponse {
    fn from(insurance: Insurance) -> Self {
        Self {
            insurance_type: insurance.insurance_type,
            amount_per_month: insurance.amount_per_month,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub user_name: String,
    pub insurance_type: InsuranceType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_per_month: Decimal,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            user_name: quote.user_name.into_inner(),
            insurance_type: quote.insurance_type,
            amount_per_month: quote.amount_per_month,
        }
    }
}
