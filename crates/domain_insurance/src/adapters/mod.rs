//! Queue Adapters for Purchase Notifications
//!
//! Implementations of the `PolicyNotifier` port.
//!
//! # Available Adapters
//!
//! - **AzureQueueNotifier**: Posts messages to an Azure Storage Queue over REST,
//!   authorised by a SAS token carried in the queue URL
//! - **ChannelQueueNotifier**: In-process queue backed by a tokio channel, drained
//!   by a [`QueueConsumer`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_insurance::adapters::{AzureQueueConfig, AzureQueueNotifier};
//! use domain_insurance::PolicyNotifier;
//! use std::sync::Arc;
//!
//! let adapter = AzureQueueNotifier::new(AzureQueueConfig {
//!     queue_url: "https://account.queue.core.windows.net/policies?sv=...&sig=...".to_string(),
//!     timeout_secs: 10,
//! })?;
//! let notifier: Arc<dyn PolicyNotifier> = Arc::new(adapter);
//! ```

pub mod azure_queue;
pub mod channel_queue;

pub use azure_queue::{AzureQueueConfig, AzureQueueNotifier};
pub use channel_queue::{ChannelQueueNotifier, QueueConsumer, channel_queue};
