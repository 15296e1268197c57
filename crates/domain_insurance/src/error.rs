//! Insurance domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the insurance domain
#[derive(Debug, Error)]
pub enum InsuranceError {
    /// The policy store failed
    #[error("Policy store error: {0}")]
    Store(#[source] PortError),

    /// The purchase could not be handed to the queue
    #[error("Notification error: {0}")]
    Notification(#[source] PortError),

    /// A purchase could not be serialized for the queue
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InsuranceError {
    /// Returns true if retrying the operation may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            InsuranceError::Store(e) | InsuranceError::Notification(e) => e.is_transient(),
            InsuranceError::Serialization(_) => false,
        }
    }
}
