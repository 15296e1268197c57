//! Azure Storage Queue Adapter
//!
//! Sends purchase messages to an Azure Storage Queue through its REST API.
//!
//! # Configuration
//!
//! The adapter takes the queue URL with a SAS token as its query string, e.g.
//! `https://account.queue.core.windows.net/policies?sv=2022-11-02&sp=a&sig=...`.
//! The token needs the `add` permission to send and `read` for health checks.
//!
//! # Error Handling
//!
//! Queue responses are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Transport failures -> `PortError::Connection`
//! - Other -> `PortError::Internal`

use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use core_kernel::{
    AdapterHealth, CoreError, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::notification::PolicyNotifier;

/// Storage service REST version sent with every request
const AZURE_QUEUE_API_VERSION: &str = "2021-08-06";

/// Default wait before retrying a throttled request
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Configuration for the Azure queue adapter
#[derive(Debug, Clone)]
pub struct AzureQueueConfig {
    /// Queue URL including the SAS query string
    pub queue_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AzureQueueConfig {
    fn default() -> Self {
        Self {
            queue_url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Azure Storage Queue adapter implementing the `PolicyNotifier` port
#[derive(Debug)]
pub struct AzureQueueNotifier {
    client: reqwest::Client,
    queue_name: String,
    messages_url: Url,
    metadata_url: Url,
    timeout: Duration,
}

impl AzureQueueNotifier {
    /// Creates an adapter for the queue at `config.queue_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is not an http(s) URL naming a
    /// queue, or if the HTTP client cannot be built
    pub fn new(config: AzureQueueConfig) -> Result<Self, CoreError> {
        let queue_url = Url::parse(&config.queue_url)
            .map_err(|e| CoreError::configuration(format!("invalid queue url: {e}")))?;
        let (queue_name, messages_url, metadata_url) = queue_endpoints(&queue_url)?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::configuration(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            queue_name,
            messages_url,
            metadata_url,
            timeout,
        })
    }

    /// Name of the target queue
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    fn transport_error(&self, operation: &str, err: reqwest::Error) -> PortError {
        if err.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            PortError::connection_with_source(
                format!("queue '{}' unreachable", self.queue_name),
                err,
            )
        }
    }
}

impl DomainPort for AzureQueueNotifier {}

#[async_trait]
impl PolicyNotifier for AzureQueueNotifier {
    fn name(&self) -> &str {
        "azure-queue"
    }

    async fn send_message(&self, message: String) -> Result<(), PortError> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .header("x-ms-version", AZURE_QUEUE_API_VERSION)
            .header(header::CONTENT_TYPE, "application/xml")
            .body(queue_message_body(&message))
            .send()
            .await
            .map_err(|e| self.transport_error("send_message", e))?;

        let status = response.status();
        if status.is_success() {
            debug!(queue = %self.queue_name, "Message enqueued");
            return Ok(());
        }

        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        Err(status_error(status, retry_after, &self.queue_name))
    }
}

#[async_trait]
impl HealthCheckable for AzureQueueNotifier {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self
            .client
            .get(self.metadata_url.clone())
            .header("x-ms-version", AZURE_QUEUE_API_VERSION)
            .send()
            .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.status().is_success() => {
                HealthCheckResult::new(self.name(), AdapterHealth::Healthy, latency_ms)
            }
            Ok(response) => {
                let status = response.status();
                warn!(queue = %self.queue_name, status = %status, "Queue health check failed");
                HealthCheckResult::new(self.name(), AdapterHealth::Unhealthy, latency_ms)
                    .with_message(format!("queue responded with {status}"))
            }
            Err(e) => {
                warn!(queue = %self.queue_name, error = %e, "Queue unreachable");
                HealthCheckResult::new(self.name(), AdapterHealth::Unhealthy, latency_ms)
                    .with_message(e.to_string())
            }
        }
    }
}

/// Derives the queue name, the messages endpoint and the metadata endpoint
/// from a queue URL, carrying its SAS query string along
fn queue_endpoints(queue_url: &Url) -> Result<(String, Url, Url), CoreError> {
    if !matches!(queue_url.scheme(), "http" | "https") {
        return Err(CoreError::configuration(format!(
            "queue url must use http or https, got '{}'",
            queue_url.scheme()
        )));
    }

    let queue_name = queue_url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| CoreError::configuration("queue url does not name a queue"))?;

    let mut messages_url = queue_url.clone();
    messages_url
        .path_segments_mut()
        .map_err(|_| CoreError::configuration("queue url cannot carry a path"))?
        .pop_if_empty()
        .push("messages");

    let mut metadata_url = queue_url.clone();
    metadata_url.query_pairs_mut().append_pair("comp", "metadata");

    Ok((queue_name, messages_url, metadata_url))
}

/// Wraps a message in the `QueueMessage` envelope the Put Message call expects
fn queue_message_body(message: &str) -> String {
    format!(
        "<QueueMessage><MessageText>{}</MessageText></QueueMessage>",
        xml_escape(message)
    )
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn status_error(status: StatusCode, retry_after: Option<u64>, queue_name: &str) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PortError::unauthorized(format!("queue '{queue_name}' rejected the SAS token"))
        }
        StatusCode::NOT_FOUND => PortError::not_found("Queue", queue_name),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        s if s.is_server_error() => PortError::unavailable(format!("azure queue '{queue_name}'")),
        s => PortError::internal(format!("queue '{queue_name}' responded with {s}")),
    }
}
