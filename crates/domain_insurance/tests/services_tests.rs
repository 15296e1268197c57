//! Insurance Service Tests
//!
//! Covers the three operations behind the API:
//! - listing a user's policies
//! - quoting a product
//! - buying a policy, including the client price check, identity override,
//!   replacement of same-type policies and queue hand-off
//!
//! # Test Organization
//!
//! - `listing` - Lookups against the seed state
//! - `quoting` - Quote construction
//! - `price_check` - Which client prices are trusted
//! - `purchase` - Storage and identity handling
//! - `notification` - Queue behaviour

use std::sync::Arc;

use domain_insurance::{
    channel_queue, Insurance, InsuranceError, InsuranceService, InsuranceType, PolicyStore,
    PurchaseLimits, RandomQuoteCalculator,
};
use rust_decimal_macros::dec;
use test_utils::{
    assert_at_most_one_per_type, assert_in_price_range, seeded_service, single_policy_of,
    AmountFixtures, FailingNotifier, FailingPolicyStore, FixedQuoteCalculator, QuoteBuilder,
    RecordingNotifier, SeedFixtures, UserFixtures,
};

fn random_service() -> InsuranceService {
    seeded_service(Arc::new(RandomQuoteCalculator::new())).0
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_seed_user_holds_one_boat_policy() {
        let service = random_service();

        let policies = service.list_insurances(&UserFixtures::seed_user()).await.unwrap();

        assert_eq!(policies, vec![SeedFixtures::seed_policy()]);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_policies() {
        let service = random_service();

        let policies = service.list_insurances(&UserFixtures::new_customer()).await.unwrap();

        assert!(policies.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let service = InsuranceService::new(
            Arc::new(FailingPolicyStore),
            Arc::new(RandomQuoteCalculator::new()),
        );

        let err = service.list_insurances(&UserFixtures::seed_user()).await.unwrap_err();

        assert!(matches!(err, InsuranceError::Store(_)));
        assert!(err.is_transient());
    }
}

mod quoting {
    use super::*;

    #[test]
    fn test_quote_names_caller_and_product() {
        let (service, _) = seeded_service(Arc::new(FixedQuoteCalculator::new(dec!(42))));
        let user = UserFixtures::new_customer();

        let quote = service.calculate_quote(&user, InsuranceType::Health);

        assert_eq!(quote.user_name, user);
        assert_eq!(quote.insurance_type, InsuranceType::Health);
        assert_eq!(quote.amount_per_month, dec!(42));
    }

    #[test]
    fn test_random_quotes_stay_in_band() {
        let service = random_service();
        let user = UserFixtures::new_customer();

        for insurance_type in InsuranceType::ALL {
            for _ in 0..50 {
                let quote = service.calculate_quote(&user, insurance_type);
                assert_in_price_range(quote.amount_per_month, insurance_type);
            }
        }
    }
}

mod price_check {
    use super::*;

    #[tokio::test]
    async fn test_boundary_prices_are_kept() {
        let calculator = Arc::new(FixedQuoteCalculator::new(dec!(99)));
        let (service, _) = seeded_service(calculator.clone());
        let user = UserFixtures::new_customer();

        for amount in [AmountFixtures::lowest_accepted(), AmountFixtures::highest_accepted()] {
            let quote = QuoteBuilder::new().user(user.clone()).amount(amount).build();
            let stored = service.buy_insurance(&user, quote).await.unwrap();
            assert_eq!(stored.amount_per_month, amount);
        }
        assert_eq!(calculator.calls(), 0);
    }

    #[tokio::test]
    async fn test_prices_outside_limits_are_recalculated() {
        let service = random_service();
        let user = UserFixtures::new_customer();

        for (insurance_type, amount) in [
            (InsuranceType::Health, AmountFixtures::below_limits()),
            (InsuranceType::Boat, AmountFixtures::above_limits()),
        ] {
            let quote = QuoteBuilder::new()
                .insurance_type(insurance_type)
                .amount(amount)
                .build();
            let stored = service.buy_insurance(&user, quote).await.unwrap();

            assert_ne!(stored.amount_per_month, amount);
            assert_in_price_range(stored.amount_per_month, insurance_type);
        }
    }

    #[tokio::test]
    async fn test_out_of_range_house_purchase_for_new_customer() {
        let (service, store) = seeded_service(Arc::new(RandomQuoteCalculator::new()));
        let user = UserFixtures::new_customer();
        let quote = QuoteBuilder::new()
            .user(user.clone())
            .insurance_type(InsuranceType::House)
            .amount(dec!(200))
            .build();

        let stored = service.buy_insurance(&user, quote).await.unwrap();

        assert_in_price_range(stored.amount_per_month, InsuranceType::House);
        let policies = store.get_insurances(&user).await.unwrap();
        assert_eq!(single_policy_of(&policies, InsuranceType::House), stored);
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let calculator = Arc::new(FixedQuoteCalculator::new(dec!(12)));
        let (service, _) = seeded_service(calculator.clone());
        let service = service.with_limits(PurchaseLimits::new(dec!(10), dec!(20)));
        let user = UserFixtures::new_customer();

        let stored = service
            .buy_insurance(&user, QuoteBuilder::new().amount(dec!(25)).build())
            .await
            .unwrap();

        assert_eq!(stored.amount_per_month, dec!(12));
        assert_eq!(calculator.calls(), 1);
    }
}

mod purchase {
    use super::*;

    #[tokio::test]
    async fn test_client_user_name_is_ignored() {
        let (service, store) = seeded_service(Arc::new(RandomQuoteCalculator::new()));
        let caller = UserFixtures::new_customer();
        let victim = UserFixtures::seed_user();
        let quote = QuoteBuilder::new()
            .user(victim.clone())
            .insurance_type(InsuranceType::Boat)
            .amount(dec!(6))
            .build();

        service.buy_insurance(&caller, quote).await.unwrap();

        assert_eq!(
            store.get_insurances(&victim).await.unwrap(),
            vec![SeedFixtures::seed_policy()]
        );
        assert_eq!(
            store.get_insurances(&caller).await.unwrap(),
            vec![Insurance::new(InsuranceType::Boat, dec!(6))]
        );
    }

    #[tokio::test]
    async fn test_second_purchase_replaces_first() {
        let service = random_service();
        let user = UserFixtures::new_customer();

        for amount in [dec!(40), dec!(55)] {
            let quote = QuoteBuilder::new().insurance_type(InsuranceType::House).amount(amount).build();
            service.buy_insurance(&user, quote).await.unwrap();
        }

        let policies = service.list_insurances(&user).await.unwrap();
        assert_eq!(policies, vec![Insurance::new(InsuranceType::House, dec!(55))]);
    }

    #[tokio::test]
    async fn test_seed_user_can_replace_seed_policy() {
        let service = random_service();
        let user = UserFixtures::seed_user();
        let quote = QuoteBuilder::new().insurance_type(InsuranceType::Boat).amount(dec!(9)).build();

        service.buy_insurance(&user, quote).await.unwrap();

        let policies = service.list_insurances(&user).await.unwrap();
        assert_eq!(single_policy_of(&policies, InsuranceType::Boat).amount_per_month, dec!(9));
        assert_at_most_one_per_type(&policies);
    }

    #[tokio::test]
    async fn test_store_failure_fails_purchase() {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = InsuranceService::new(
            Arc::new(FailingPolicyStore),
            Arc::new(RandomQuoteCalculator::new()),
        )
        .with_notifier(notifier.clone());

        let result = service
            .buy_insurance(&UserFixtures::new_customer(), QuoteBuilder::new().build())
            .await;

        assert!(matches!(result, Err(InsuranceError::Store(_))));
        assert!(notifier.messages().is_empty());
    }
}

mod notification {
    use super::*;

    #[tokio::test]
    async fn test_purchase_is_queued_as_insurance_json() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (service, _) = seeded_service(Arc::new(RandomQuoteCalculator::new()));
        let service = service.with_notifier(notifier.clone());
        let user = UserFixtures::new_customer();

        let quote = QuoteBuilder::new().insurance_type(InsuranceType::Health).amount(dec!(100)).build();
        service.buy_insurance(&user, quote).await.unwrap();

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        let queued: Insurance = serde_json::from_str(&messages[0]).unwrap();
        assert_eq!(queued, Insurance::new(InsuranceType::Health, dec!(100)));

        let value: serde_json::Value = serde_json::from_str(&messages[0]).unwrap();
        assert_eq!(value["insuranceType"], "Health");
        assert!(value.get("userName").is_none());
    }

    #[tokio::test]
    async fn test_queue_failure_does_not_fail_purchase() {
        let (service, store) = seeded_service(Arc::new(RandomQuoteCalculator::new()));
        let service = service.with_notifier(Arc::new(FailingNotifier));
        let user = UserFixtures::new_customer();

        let stored = service
            .buy_insurance(&user, QuoteBuilder::new().amount(dec!(33)).build())
            .await
            .unwrap();

        assert_eq!(store.get_insurances(&user).await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_publish_without_queue_is_noop() {
        let service = random_service();

        let sent = service.publish(&SeedFixtures::seed_policy()).await.unwrap();

        assert!(!sent);
        assert!(service.notifier().is_none());
    }

    #[tokio::test]
    async fn test_full_queue_does_not_block_purchase() {
        let (notifier, _consumer) = channel_queue(1);
        let (service, store) = seeded_service(Arc::new(FixedQuoteCalculator::new(dec!(40))));
        let service = service.with_notifier(Arc::new(notifier));
        let user = UserFixtures::new_customer();

        service
            .buy_insurance(&user, QuoteBuilder::new().insurance_type(InsuranceType::House).amount(dec!(40)).build())
            .await
            .unwrap();

        let second = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            service.buy_insurance(&user, QuoteBuilder::new().insurance_type(InsuranceType::Boat).amount(dec!(8)).build()),
        )
        .await
        .expect("purchase waited on a full queue");

        assert_eq!(second.unwrap(), Insurance::new(InsuranceType::Boat, dec!(8)));
        assert_eq!(store.get_insurances(&user).await.unwrap().len(), 2);
        assert!(matches!(
            service.publish(&SeedFixtures::seed_policy()).await,
            Err(InsuranceError::Notification(_))
        ));
    }

    #[tokio::test]
    async fn test_channel_queue_receives_purchase() {
        let (notifier, mut consumer) = channel_queue(8);
        let (service, _) = seeded_service(Arc::new(RandomQuoteCalculator::new()));
        let service = service.with_notifier(Arc::new(notifier));

        service
            .buy_insurance(
                &UserFixtures::other_customer(),
                QuoteBuilder::new().insurance_type(InsuranceType::Boat).amount(dec!(7)).build(),
            )
            .await
            .unwrap();

        let message = consumer.recv().await.unwrap();
        let queued: Insurance = serde_json::from_str(&message).unwrap();
        assert_eq!(queued, Insurance::new(InsuranceType::Boat, dec!(7)));
    }
}
