//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data and service wiring. Fixtures are fixed
//! values so failures are reproducible.

use std::sync::Arc;

use core_kernel::UserName;
use domain_insurance::{
    InMemoryPolicyStore, Insurance, InsuranceService, InsuranceType, PolicyStore,
    QuoteCalculator, SEED_USER,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for caller identities
pub struct UserFixtures;

impl UserFixtures {
    /// The user owning the demo boat policy
    pub fn seed_user() -> UserName {
        Self::named(SEED_USER)
    }

    /// A user with no policies in the seed data
    pub fn new_customer() -> UserName {
        Self::named("user 02")
    }

    /// A second user, for isolation checks
    pub fn other_customer() -> UserName {
        Self::named("user 03")
    }

    /// Parses a fixture name
    pub fn named(name: &str) -> UserName {
        UserName::parse(name).expect("fixture user names are not blank")
    }
}

/// Fixture for monthly amounts around the purchase limits
pub struct AmountFixtures;

impl AmountFixtures {
    /// Lowest price a client may choose
    pub fn lowest_accepted() -> Decimal {
        dec!(5)
    }

    /// Highest price a client may choose
    pub fn highest_accepted() -> Decimal {
        dec!(150)
    }

    /// Just below the accepted band
    pub fn below_limits() -> Decimal {
        dec!(4)
    }

    /// Just above the accepted band
    pub fn above_limits() -> Decimal {
        dec!(151)
    }
}

/// Fixture for the seed state
pub struct SeedFixtures;

impl SeedFixtures {
    /// The single policy held by the seed user
    pub fn seed_policy() -> Insurance {
        Insurance::new(InsuranceType::Boat, dec!(15))
    }
}

/// Wires a service over a fresh seeded store
///
/// Returns the store too so tests can inspect it directly.
pub fn seeded_service(
    calculator: Arc<dyn QuoteCalculator>,
) -> (InsuranceService, Arc<InMemoryPolicyStore>) {
    let store = Arc::new(InMemoryPolicyStore::with_seed_data());
    let service = InsuranceService::new(store.clone() as Arc<dyn PolicyStore>, calculator);
    (service, store)
}
