//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;
use domain_insurance::AzureQueueConfig;

/// Secret used when none is configured; only fit for local runs
pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production";

/// Value of `queue_url` selecting the in-process queue
pub const IN_PROCESS_QUEUE: &str = "memory";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// HS256 secret bearer tokens are signed with
    pub jwt_secret: String,
    /// Scope every token must carry, if set
    pub required_scope: Option<String>,
    /// Purchase queue: an Azure queue URL with SAS token, or `memory`
    pub queue_url: Option<String>,
    /// Queue request timeout in seconds
    pub queue_timeout_secs: u64,
    /// Whether the store starts with the demo policy
    pub seed_demo_data: bool,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            required_scope: None,
            queue_url: None,
            queue_timeout_secs: 10,
            seed_demo_data: true,
            log_level: "info".to_string(),
        }
    }
}

/// Where purchases are queued
#[derive(Debug, Clone)]
pub enum QueueSettings {
    /// No queue; purchases are only stored
    Disabled,
    /// Tokio channel drained inside the process
    InProcess,
    /// Azure Storage Queue
    Azure(AzureQueueConfig),
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = ApiConfig::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("queue_timeout_secs", defaults.queue_timeout_secs)?
            .set_default("seed_demo_data", defaults.seed_demo_data)?
            .set_default("log_level", defaults.log_level)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Checks values the server cannot start without
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(CoreError::configuration("jwt_secret must not be empty"));
        }
        if self.queue_timeout_secs == 0 {
            return Err(CoreError::configuration("queue_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Returns true if tokens are checked against the development secret
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Resolves the purchase queue from `queue_url`
    pub fn queue_settings(&self) -> QueueSettings {
        match self.queue_url.as_deref().map(str::trim) {
            None | Some("") => QueueSettings::Disabled,
            Some(IN_PROCESS_QUEUE) => QueueSettings::InProcess,
            Some(url) => QueueSettings::Azure(AzureQueueConfig {
                queue_url: url.to_string(),
                timeout_secs: self.queue_timeout_secs,
            }),
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
