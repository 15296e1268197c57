//! Per-user policy store
//!
//! Policies are keyed by the owner's display name. A user holds at most one
//! policy per product: buying a product again replaces the earlier policy
//! rather than adding a second one.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, PortError, UserName};
use crate::insurance::{Insurance, Quote};
use crate::product::InsuranceType;

/// User that owns the demo policy loaded by [`InMemoryPolicyStore::with_seed_data`]
pub const SEED_USER: &str = "user 01";

/// Storage port for issued policies
#[async_trait]
pub trait PolicyStore: DomainPort {
    /// Returns the user's policies, empty when the user holds none
    async fn get_insurances(&self, user_name: &UserName) -> Result<Vec<Insurance>, PortError>;

    /// Stores a policy for the quote's user, replacing any policy of the same type
    ///
    /// # Returns
    ///
    /// The newly stored policy
    async fn add_insurance(&self, quote: &Quote) -> Result<Insurance, PortError>;
}

/// Process-wide policy store held in memory
///
/// One lock guards the whole map so the remove-then-insert of a purchase is
/// never interleaved with another purchase for the same user.
#[derive(Debug, Default)]
pub struct InMemoryPolicyStore {
    data: RwLock<HashMap<UserName, Vec<Insurance>>>,
}

impl InMemoryPolicyStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the demo policy: a boat policy at 15 per month
    /// for [`SEED_USER`]
    pub fn with_seed_data() -> Self {
        let mut data = HashMap::new();
        data.insert(
            UserName::parse(SEED_USER).expect("seed user name is not blank"),
            vec![Insurance::new(InsuranceType::Boat, Decimal::from(15))],
        );
        Self {
            data: RwLock::new(data),
        }
    }

    /// Number of users holding at least one policy
    pub async fn user_count(&self) -> usize {
        self.data.read().await.len()
    }
}

impl DomainPort for InMemoryPolicyStore {}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn get_insurances(&self, user_name: &UserName) -> Result<Vec<Insurance>, PortError> {
        let data = self.data.read().await;
        Ok(data.get(user_name).cloned().unwrap_or_default())
    }

    async fn add_insurance(&self, quote: &Quote) -> Result<Insurance, PortError> {
        let insurance = Insurance::from(quote);

        let mut data = self.data.write().await;
        let policies = data.entry(quote.user_name.clone()).or_default();

        let before = policies.len();
        policies.retain(|existing| existing.insurance_type != quote.insurance_type);
        if policies.len() != before {
            debug!(
                user = %quote.user_name,
                insurance_type = %quote.insurance_type,
                "Replacing existing policy"
            );
        }
        policies.push(insurance);

        Ok(insurance)
    }
}
