//! Core types for dashboard operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A dashboard as fetched from, and written back to, Grafana.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// The dashboard JSON model (panels, queries, layout).
    pub model: Value,
    /// Metadata returned alongside the model.
    pub meta: DashboardMeta,
    /// Folder the dashboard lives in.
    pub folder_id: Option<i64>,
    /// Folder uid the dashboard lives in.
    pub folder_uid: Option<String>,
    /// Whether a save should replace a conflicting version.
    pub overwrite: bool,
    /// Change-history message recorded with the save.
    pub message: String,
}

impl Dashboard {
    /// Create a dashboard from a bare model with empty metadata.
    pub fn new(model: Value) -> Self {
        Self {
            model,
            meta: DashboardMeta::default(),
            folder_id: None,
            folder_uid: None,
            overwrite: false,
            message: String::new(),
        }
    }

    /// The `uid` field of the model, if present.
    pub fn uid(&self) -> Option<&str> {
        self.model.get("uid").and_then(Value::as_str)
    }

    /// The `title` field of the model, if present.
    pub fn title(&self) -> Option<&str> {
        self.model.get("title").and_then(Value::as_str)
    }
}

/// Metadata Grafana returns with a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Relative URL of the dashboard.
    #[serde(default)]
    pub url: Option<String>,
    /// Stored version.
    #[serde(default)]
    pub version: Option<i64>,
    /// Folder id.
    #[serde(default)]
    pub folder_id: Option<i64>,
    /// Folder uid.
    #[serde(default)]
    pub folder_uid: Option<String>,
    /// Folder title.
    #[serde(default)]
    pub folder_title: Option<String>,
}

/// Response of a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Numeric dashboard id.
    #[serde(default)]
    pub id: i64,
    /// Dashboard uid.
    #[serde(default)]
    pub uid: String,
    /// Relative URL of the saved dashboard.
    #[serde(default)]
    pub url: String,
    /// Status string (usually "success").
    #[serde(default)]
    pub status: String,
    /// New stored version.
    #[serde(default)]
    pub version: i64,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
}

/// Connection settings for a Grafana instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Grafana instance.
    pub url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Retries after the first failed attempt of each call.
    pub retries: u32,
}

/// Retry configuration for API calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_factor: f64,
    /// Maximum delay between retries
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from_retries(3)
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings.
    pub fn new(max_attempts: u32, base_delay: Duration, backoff_factor: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff_factor,
            max_delay: Duration::from_secs(30),
        }
    }

    /// Config allowing `retries` retries after the first attempt.
    pub fn from_retries(retries: u32) -> Self {
        Self::new(retries.saturating_add(1), Duration::from_secs(1), 2.0)
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.as_secs_f64() * self.backoff_factor.powi(attempt as i32);
        let capped = delay.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Same policy with a different base delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Create a config that never retries.
    pub fn no_retry() -> Self {
        Self::from_retries(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_retry_config_from_retries() {
        let config = RetryConfig::from_retries(3);
        assert_eq!(config.max_attempts, 4);
        assert_eq!(RetryConfig::no_retry().max_attempts, 1);
        assert_eq!(RetryConfig::default().max_attempts, 4);
    }

    #[test]
    fn test_retry_config_delay() {
        let config = RetryConfig::new(5, Duration::from_secs(1), 2.0);

        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(10), Duration::from_secs(30));
    }

    #[test]
    fn test_retry_config_saturates() {
        assert_eq!(RetryConfig::from_retries(u32::MAX).max_attempts, u32::MAX);
    }

    #[test]
    fn test_dashboard_accessors() {
        let dashboard = Dashboard::new(json!({"uid": "abc", "title": "Latency"}));
        assert_eq!(dashboard.uid(), Some("abc"));
        assert_eq!(dashboard.title(), Some("Latency"));
        assert!(!dashboard.overwrite);

        let bare = Dashboard::new(json!({}));
        assert_eq!(bare.uid(), None);
    }

    #[test]
    fn test_meta_deserializes_camel_case() {
        let meta: DashboardMeta = serde_json::from_value(json!({
            "slug": "latency",
            "folderId": 7,
            "folderUid": "ops",
            "version": 12,
            "isStarred": false
        }))
        .unwrap();
        assert_eq!(meta.folder_id, Some(7));
        assert_eq!(meta.folder_uid.as_deref(), Some("ops"));
        assert_eq!(meta.version, Some(12));
        assert_eq!(meta.folder_title, None);
    }
}
