//! Insurance domain service
//!
//! Orchestrates the three operations the API exposes: listing a user's
//! policies, quoting a product, and buying a policy.

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::UserName;
use crate::error::InsuranceError;
use crate::insurance::{Insurance, PurchaseLimits, Quote};
use crate::notification::PolicyNotifier;
use crate::product::InsuranceType;
use crate::quote::QuoteCalculator;
use crate::store::PolicyStore;

/// Service behind the insurance endpoints
///
/// Every operation takes the caller identity as established by the
/// authentication layer; identities supplied in request bodies are never used.
#[derive(Clone)]
pub struct InsuranceService {
    store: Arc<dyn PolicyStore>,
    calculator: Arc<dyn QuoteCalculator>,
    notifier: Option<Arc<dyn PolicyNotifier>>,
    limits: PurchaseLimits,
}

impl InsuranceService {
    /// Creates a service without a purchase queue
    pub fn new(store: Arc<dyn PolicyStore>, calculator: Arc<dyn QuoteCalculator>) -> Self {
        Self {
            store,
            calculator,
            notifier: None,
            limits: PurchaseLimits::default(),
        }
    }

    /// Hands every purchase to `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn PolicyNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Overrides the band of client prices accepted verbatim
    pub fn with_limits(mut self, limits: PurchaseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The configured purchase queue, if any
    pub fn notifier(&self) -> Option<&Arc<dyn PolicyNotifier>> {
        self.notifier.as_ref()
    }

    /// Returns the caller's policies
    pub async fn list_insurances(&self, user_name: &UserName) -> Result<Vec<Insurance>, InsuranceError> {
        self.store
            .get_insurances(user_name)
            .await
            .map_err(InsuranceError::Store)
    }

    /// Quotes a monthly price for the caller
    pub fn calculate_quote(&self, user_name: &UserName, insurance_type: InsuranceType) -> Quote {
        let amount = self.calculator.calculate_quote(user_name, insurance_type);
        Quote::new(user_name.clone(), insurance_type, amount)
    }

    /// Buys a policy for the caller
    ///
    /// This method:
    /// 1. Keeps the submitted price if it lies within the purchase limits,
    ///    otherwise quotes a fresh one
    /// 2. Assigns the policy to `user_name`, whatever the quote names
    /// 3. Stores it, replacing any policy of the same type
    /// 4. Queues the new policy if a notifier is configured
    ///
    /// Queue failures are logged and do not fail the purchase.
    ///
    /// # Returns
    ///
    /// The stored policy
    ///
    /// # Errors
    ///
    /// Returns an error if the policy store fails
    pub async fn buy_insurance(&self, user_name: &UserName, quote: Quote) -> Result<Insurance, InsuranceError> {
        let amount = if self.limits.accepts(quote.amount_per_month) {
            quote.amount_per_month
        } else {
            self.calculator.calculate_quote(user_name, quote.insurance_type)
        };

        let quote = quote.for_user(user_name.clone()).with_amount(amount);
        let insurance = self
            .store
            .add_insurance(&quote)
            .await
            .map_err(InsuranceError::Store)?;

        if let Err(e) = self.publish(&insurance).await {
            warn!(
                user = %user_name,
                insurance_type = %insurance.insurance_type,
                error = %e,
                "Purchase stored but not queued"
            );
        }

        info!(
            insurance_type = %quote.insurance_type,
            user = %user_name,
            amount_per_month = %amount,
            "Sold insurance"
        );

        Ok(insurance)
    }

    /// Sends `insurance` to the queue as JSON
    ///
    /// # Returns
    ///
    /// `false` if no queue is configured
    pub async fn publish(&self, insurance: &Insurance) -> Result<bool, InsuranceError> {
        let Some(notifier) = &self.notifier else {
            return Ok(false);
        };

        let message = serde_json::to_string(insurance)?;
        notifier
            .send_message(message)
            .await
            .map_err(InsuranceError::Notification)?;
        Ok(true)
    }
}
