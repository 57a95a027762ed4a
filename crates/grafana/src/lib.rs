//! # grafana
//!
//! Minimal blocking client for the Grafana dashboard API.
//!
//! This crate provides:
//! - Fetching a dashboard by uid
//! - Saving a dashboard with an overwrite policy and a change message
//! - Retrying transient failures with exponential backoff, bounded by a
//!   configurable retry count applied to every call
//!
//! ## Example
//!
//! ```no_run
//! use grafana::{Client, ClientConfig};
//!
//! let client = Client::new(&ClientConfig {
//!     url: "https://grafana.example.com".to_string(),
//!     api_key: "glsa_xxx".to_string(),
//!     retries: 3,
//! })
//! .expect("invalid config");
//!
//! let mut dashboard = client.dashboard_by_uid("abc123").expect("fetch failed");
//! dashboard.overwrite = true;
//! dashboard.message = "rename datasource".to_string();
//! client.save_dashboard(&dashboard).expect("save failed");
//! ```
//!
//! ## Testing
//!
//! Swap in [`MockBackend`] with [`Client::with_backend`] to run without a
//! Grafana instance.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod retry;
pub mod types;

pub use backend::MockBackend;
pub use error::{Error, ErrorCategory, Result};
pub use types::{ClientConfig, Dashboard, DashboardMeta, RetryConfig, SaveResponse};

use backend::Backend;
use backend::http::HttpBackend;
use retry::{LogCallback, with_retry};

/// High-level client for dashboard operations.
pub struct Client {
    backend: Box<dyn Backend>,
    retry: RetryConfig,
}

impl Client {
    /// Create a client for a Grafana instance.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the configured url is unusable.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let backend = HttpBackend::new(&config.url, &config.api_key)?;
        Ok(Self {
            backend: Box::new(backend),
            retry: RetryConfig::from_retries(config.retries),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>, retry: RetryConfig) -> Self {
        Self { backend, retry }
    }

    /// Retry policy applied to every call.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Fetch a dashboard by uid, retrying transient failures.
    pub fn dashboard_by_uid(&self, uid: &str) -> Result<Dashboard> {
        let callback = LogCallback {
            operation: "fetch dashboard",
        };
        with_retry(&self.retry, Some(&callback), || {
            self.backend.fetch_dashboard(uid)
        })
    }

    /// Save a dashboard, retrying transient failures.
    ///
    /// Conflicts are never retried; whether one occurs depends on the
    /// dashboard's `overwrite` flag.
    pub fn save_dashboard(&self, dashboard: &Dashboard) -> Result<SaveResponse> {
        let callback = LogCallback {
            operation: "save dashboard",
        };
        with_retry(&self.retry, Some(&callback), || {
            self.backend.save_dashboard(dashboard)
        })
    }
}
