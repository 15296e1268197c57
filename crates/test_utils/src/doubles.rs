//! Test Doubles
//!
//! Stand-ins for the domain's collaborators: calculators with predictable
//! output, a notifier that records what it was sent, and collaborators that
//! always fail.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, UserName,
};
use domain_insurance::{Insurance, InsuranceType, PolicyNotifier, PolicyStore, Quote, QuoteCalculator};
use rust_decimal::Decimal;

/// Calculator returning the same amount for every product
#[derive(Debug)]
pub struct FixedQuoteCalculator {
    amount: Decimal,
    calls: AtomicUsize,
}

impl FixedQuoteCalculator {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of quotes calculated so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuoteCalculator for FixedQuoteCalculator {
    fn calculate_quote(&self, _user_name: &UserName, _insurance_type: InsuranceType) -> Decimal {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.amount
    }
}

/// Notifier that keeps every message it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("recording lock poisoned").clone()
    }
}

impl DomainPort for RecordingNotifier {}

#[async_trait]
impl PolicyNotifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send_message(&self, message: String) -> Result<(), PortError> {
        self.messages.lock().expect("recording lock poisoned").push(message);
        Ok(())
    }
}

#[async_trait]
impl HealthCheckable for RecordingNotifier {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new(self.name(), AdapterHealth::Healthy, 0)
    }
}

/// Notifier whose queue is always down
#[derive(Debug, Default)]
pub struct FailingNotifier;

impl DomainPort for FailingNotifier {}

#[async_trait]
impl PolicyNotifier for FailingNotifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send_message(&self, _message: String) -> Result<(), PortError> {
        Err(PortError::unavailable("failing queue"))
    }
}

#[async_trait]
impl HealthCheckable for FailingNotifier {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new(self.name(), AdapterHealth::Unhealthy, 0)
            .with_message("queue is down")
    }
}

/// Policy store that rejects every call
#[derive(Debug, Default)]
pub struct FailingPolicyStore;

impl DomainPort for FailingPolicyStore {}

#[async_trait]
impl PolicyStore for FailingPolicyStore {
    async fn get_insurances(&self, _user_name: &UserName) -> Result<Vec<Insurance>, PortError> {
        Err(PortError::connection("store offline"))
    }

    async fn add_insurance(&self, _quote: &Quote) -> Result<Insurance, PortError> {
        Err(PortError::connection("store offline"))
    }
}
