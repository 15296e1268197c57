//! Policy Store Tests
//!
//! Covers lookups, replace-on-same-type, isolation between users, and the
//! one-policy-per-type invariant under sequential and concurrent purchases.

use std::sync::Arc;

use domain_insurance::{InMemoryPolicyStore, Insurance, InsuranceType, PolicyStore, Quote};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::{
    assert_at_most_one_per_type, fake_user_name, purchase_sequence_strategy, single_policy_of,
    QuoteBuilder, SeedFixtures, UserFixtures,
};

mod lookups {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_knows_nobody() {
        let store = InMemoryPolicyStore::new();

        assert!(store.get_insurances(&UserFixtures::seed_user()).await.unwrap().is_empty());
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_seeded_store_holds_only_seed_user() {
        let store = InMemoryPolicyStore::with_seed_data();

        assert_eq!(store.user_count().await, 1);
        assert_eq!(
            store.get_insurances(&UserFixtures::seed_user()).await.unwrap(),
            vec![SeedFixtures::seed_policy()]
        );
    }

    #[tokio::test]
    async fn test_unseen_user_gets_empty_list() {
        let store = InMemoryPolicyStore::with_seed_data();

        let policies = store.get_insurances(&fake_user_name()).await.unwrap();

        assert!(policies.is_empty());
    }
}

mod adding {
    use super::*;

    #[tokio::test]
    async fn test_add_returns_new_policy() {
        let store = InMemoryPolicyStore::new();
        let quote = QuoteBuilder::new().insurance_type(InsuranceType::Health).amount(dec!(120)).build();

        let added = store.add_insurance(&quote).await.unwrap();

        assert_eq!(added, Insurance::new(InsuranceType::Health, dec!(120)));
    }

    #[tokio::test]
    async fn test_replacement_discards_prior_amount() {
        let store = InMemoryPolicyStore::new();
        let user = UserFixtures::new_customer();

        for amount in [dec!(149), dec!(80), dec!(95.5)] {
            let quote = Quote::new(user.clone(), InsuranceType::Health, amount);
            store.add_insurance(&quote).await.unwrap();
        }

        let policies = store.get_insurances(&user).await.unwrap();
        assert_eq!(policies, vec![Insurance::new(InsuranceType::Health, dec!(95.5))]);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryPolicyStore::with_seed_data();
        let user = UserFixtures::new_customer();

        store
            .add_insurance(&Quote::new(user.clone(), InsuranceType::Boat, dec!(8)))
            .await
            .unwrap();

        assert_eq!(
            store.get_insurances(&UserFixtures::seed_user()).await.unwrap(),
            vec![SeedFixtures::seed_policy()]
        );
        assert_eq!(
            store.get_insurances(&user).await.unwrap(),
            vec![Insurance::new(InsuranceType::Boat, dec!(8))]
        );
        assert!(store.get_insurances(&UserFixtures::other_customer()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_can_hold_every_product() {
        let store = InMemoryPolicyStore::new();
        let user = UserFixtures::new_customer();

        for insurance_type in InsuranceType::ALL {
            store
                .add_insurance(&Quote::new(user.clone(), insurance_type, dec!(50)))
                .await
                .unwrap();
        }

        let policies = store.get_insurances(&user).await.unwrap();
        assert_eq!(policies.len(), 3);
        assert_at_most_one_per_type(&policies);
    }
}

mod concurrency {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_type_purchases_leave_one_policy() {
        let store = Arc::new(InMemoryPolicyStore::new());
        let user = UserFixtures::new_customer();

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                let quote = Quote::new(user.clone(), InsuranceType::House, rust_decimal::Decimal::from(30 + i % 40));
                tokio::spawn(async move { store.add_insurance(&quote).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let policies = store.get_insurances(&user).await.unwrap();
        assert_at_most_one_per_type(&policies);
        single_policy_of(&policies, InsuranceType::House);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mixed_purchases_keep_invariant() {
        let store = Arc::new(InMemoryPolicyStore::with_seed_data());
        let users = [
            UserFixtures::seed_user(),
            UserFixtures::new_customer(),
            UserFixtures::other_customer(),
        ];

        let mut handles = Vec::new();
        for round in 0..30 {
            for (i, user) in users.iter().enumerate() {
                let store = store.clone();
                let insurance_type = InsuranceType::ALL[(round + i) % 3];
                let quote = Quote::new(user.clone(), insurance_type, dec!(20));
                handles.push(tokio::spawn(async move { store.add_insurance(&quote).await }));
            }
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for user in &users {
            let policies = store.get_insurances(user).await.unwrap();
            assert_eq!(policies.len(), 3);
            assert_at_most_one_per_type(&policies);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_last_purchase_per_type_wins(purchases in purchase_sequence_strategy(40)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = InMemoryPolicyStore::new();
            for (user, insurance_type, amount) in &purchases {
                store
                    .add_insurance(&Quote::new(user.clone(), *insurance_type, *amount))
                    .await
                    .unwrap();
            }

            for (user, insurance_type, _) in &purchases {
                let policies = store.get_insurances(user).await.unwrap();
                assert_at_most_one_per_type(&policies);

                let expected = purchases
                    .iter()
                    .rev()
                    .find(|(u, t, _)| u == user && t == insurance_type)
                    .map(|(_, _, amount)| *amount)
                    .unwrap();
                assert_eq!(single_policy_of(&policies, *insurance_type).amount_per_month, expected);
            }
        });
    }
}
