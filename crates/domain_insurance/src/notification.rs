//! Purchase notifications
//!
//! Downstream systems learn about purchases through a message queue. The queue
//! is optional: a service without a notifier simply skips this step.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

/// Port for handing purchase messages to a queue
#[async_trait]
pub trait PolicyNotifier: DomainPort + HealthCheckable {
    /// Short identifier used in logs and health reports
    fn name(&self) -> &str;

    /// Enqueues one message
    ///
    /// # Errors
    ///
    /// Returns a `PortError` if the queue rejected or never received the message
    async fn send_message(&self, message: String) -> Result<(), PortError>;
}
