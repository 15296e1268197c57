//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::UserName;
use domain_insurance::InsuranceType;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating products
pub fn insurance_type_strategy() -> impl Strategy<Value = InsuranceType> {
    prop_oneof![
        Just(InsuranceType::House),
        Just(InsuranceType::Boat),
        Just(InsuranceType::Health),
    ]
}

/// Strategy for amounts a client may choose for itself, in cents
pub fn accepted_amount_strategy() -> impl Strategy<Value = Decimal> {
    (500i64..=15_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for amounts outside the accepted band
pub fn rejected_amount_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (-100_000i64..500i64).prop_map(|cents| Decimal::new(cents, 2)),
        (15_001i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

/// Strategy for user names drawn from a small pool, so generated purchases collide
pub fn user_name_strategy() -> impl Strategy<Value = UserName> {
    (1u8..=4u8).prop_map(|n| {
        UserName::parse(format!("user {n:02}")).expect("generated names are not blank")
    })
}

/// Strategy for a sequence of purchases as (user, product, amount)
pub fn purchase_sequence_strategy(
    max_len: usize,
) -> impl Strategy<Value = Vec<(UserName, InsuranceType, Decimal)>> {
    prop::collection::vec(
        (user_name_strategy(), insurance_type_strategy(), accepted_amount_strategy()),
        1..max_len,
    )
}

/// A realistic-looking display name
pub fn fake_user_name() -> UserName {
    let name: String = Name().fake();
    UserName::parse(name).expect("faker names are not blank")
}
