//! Insurance Quoting Domain
//!
//! This crate holds the business logic behind the quoting service, free of any
//! HTTP concerns:
//! - **Products**: the closed set of insurable categories and their price bands
//! - **Quotes**: randomized monthly prices per product
//! - **Policy store**: per-user policies, at most one per product
//! - **Notifications**: optional hand-off of each purchase to a message queue
//! - **Service**: the list / quote / buy operations the API exposes
//!
//! # Purchase flow
//!
//! ```text
//! client quote -> price check (5..=150) -> [recalculate] -> store -> [queue] -> log
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_insurance::{InsuranceService, InMemoryPolicyStore, RandomQuoteCalculator};
//!
//! let service = InsuranceService::new(
//!     Arc::new(InMemoryPolicyStore::with_seed_data()),
//!     Arc::new(RandomQuoteCalculator::new()),
//! );
//! let quote = service.calculate_quote(&user, InsuranceType::House);
//! service.buy_insurance(&user, quote).await?;
//! ```

pub mod product;
pub mod insurance;
pub mod quote;
pub mod store;
pub mod notification;
pub mod adapters;
pub mod services;
pub mod error;

pub use product::InsuranceType;
pub use insurance::{Insurance, Quote, PurchaseLimits};
pub use quote::{QuoteCalculator, RandomQuoteCalculator};
pub use store::{PolicyStore, InMemoryPolicyStore, SEED_USER};
pub use notification::PolicyNotifier;
pub use adapters::{AzureQueueConfig, AzureQueueNotifier, ChannelQueueNotifier, QueueConsumer, channel_queue};
pub use services::InsuranceService;
pub use error::InsuranceError;
