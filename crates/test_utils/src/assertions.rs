//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than plain `assert!`.

use std::collections::HashSet;

use domain_insurance::{Insurance, InsuranceType};
use rust_decimal::Decimal;

/// Asserts that `amount` is a whole number inside the product's price band
///
/// # Panics
///
/// Panics if the amount is below the band, at or above its upper bound, or fractional
pub fn assert_in_price_range(amount: Decimal, insurance_type: InsuranceType) {
    let range = insurance_type.price_range();
    let (min, max) = (Decimal::from(range.start), Decimal::from(range.end));
    assert!(
        amount >= min && amount < max,
        "{} quote {} outside [{}, {})",
        insurance_type,
        amount,
        min,
        max
    );
    assert!(
        amount.fract().is_zero(),
        "{} quote {} is not a whole amount",
        insurance_type,
        amount
    );
}

/// Asserts that no product appears twice among a user's policies
///
/// # Panics
///
/// Panics naming the first duplicated product
pub fn assert_at_most_one_per_type(policies: &[Insurance]) {
    let mut seen = HashSet::new();
    for policy in policies {
        assert!(
            seen.insert(policy.insurance_type),
            "user holds more than one {} policy: {:?}",
            policy.insurance_type,
            policies
        );
    }
}

/// Returns the single policy of `insurance_type`
///
/// # Panics
///
/// Panics if there is none or more than one
pub fn single_policy_of(policies: &[Insurance], insurance_type: InsuranceType) -> Insurance {
    let matching: Vec<&Insurance> = policies
        .iter()
        .filter(|p| p.insurance_type == insurance_type)
        .collect();
    assert_eq!(
        matching.len(),
        1,
        "expected exactly one {} policy, found {:?}",
        insurance_type,
        policies
    );
    *matching[0]
}
