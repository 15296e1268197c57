//! In-process queue
//!
//! A bounded tokio channel standing in for an external queue. The notifier half
//! is handed to the service; the consumer half is drained by whatever plays the
//! downstream system, typically a background task.

use async_trait::async_trait;
use std::future::Future;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::notification::PolicyNotifier;

/// Creates a connected notifier/consumer pair holding up to `buffer_size` messages
pub fn channel_queue(buffer_size: usize) -> (ChannelQueueNotifier, QueueConsumer) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelQueueNotifier { sender }, QueueConsumer { receiver })
}

/// Sending half of the in-process queue
#[derive(Debug, Clone)]
pub struct ChannelQueueNotifier {
    sender: mpsc::Sender<String>,
}

impl DomainPort for ChannelQueueNotifier {}

#[async_trait]
impl PolicyNotifier for ChannelQueueNotifier {
    fn name(&self) -> &str {
        "channel-queue"
    }

    /// Enqueues without waiting; a full buffer is reported, not awaited
    async fn send_message(&self, message: String) -> Result<(), PortError> {
        self.sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => PortError::RateLimited { retry_after_secs: 1 },
            TrySendError::Closed(_) => PortError::unavailable("channel-queue consumer"),
        })
    }
}

#[async_trait]
impl HealthCheckable for ChannelQueueNotifier {
    async fn health_check(&self) -> HealthCheckResult {
        let status = if self.sender.is_closed() {
            AdapterHealth::Unhealthy
        } else if self.sender.capacity() == 0 {
            AdapterHealth::Degraded
        } else {
            AdapterHealth::Healthy
        };
        HealthCheckResult::new(self.name(), status, 0)
    }
}

/// Receiving half of the in-process queue
#[derive(Debug)]
pub struct QueueConsumer {
    receiver: mpsc::Receiver<String>,
}

impl QueueConsumer {
    /// Waits for the next message, `None` once every notifier is dropped
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Returns a message if one is waiting
    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }

    /// Hands every message to `handler` until all notifiers are dropped
    pub async fn run<F, Fut>(mut self, handler: F)
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = ()>,
    {
        debug!("Starting queue consumer");
        while let Some(message) = self.receiver.recv().await {
            trace!("Handling queued message");
            handler(message).await;
        }
        debug!("Queue consumer has shut down");
    }
}
