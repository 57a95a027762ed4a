//! HTTP backend for the Grafana dashboard API.
//!
//! Uses the two endpoints a patch round trip needs:
//!
//! - `GET /api/dashboards/uid/{uid}` returns `{"dashboard": ..., "meta": ...}`
//! - `POST /api/dashboards/db` creates or updates a dashboard

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{Dashboard, DashboardMeta, SaveResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const USER_AGENT: &str = concat!("grafana-rs/", env!("CARGO_PKG_VERSION"));

/// Maximum response size (dashboards with many panels exceed ureq's 10 MB default).
const MAX_BODY_SIZE: u64 = 100 * 1024 * 1024;

/// Blocking HTTP backend authenticated with a bearer API key.
pub struct HttpBackend {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Base URL without trailing slash.
    base_url: String,
    /// Value of the `Authorization` header.
    authorization: String,
}

impl HttpBackend {
    /// Create a backend for the instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the URL is empty or not http(s).
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url,
            authorization: format!("Bearer {api_key}"),
        })
    }

    /// Get the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn dashboard_url(&self, uid: &str) -> String {
        format!(
            "{}/api/dashboards/uid/{}",
            self.base_url,
            urlencoding::encode(uid)
        )
    }

    fn save_url(&self) -> String {
        format!("{}/api/dashboards/db", self.base_url)
    }
}

fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("url is empty".to_string()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::InvalidUrl(format!(
            "{trimmed} (expected an http:// or https:// url)"
        )));
    }
    Ok(trimmed.to_string())
}

impl Backend for HttpBackend {
    fn fetch_dashboard(&self, uid: &str) -> Result<Dashboard> {
        let url = self.dashboard_url(uid);
        log::debug!("GET {url}");

        let body = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| Error::from_ureq(e, uid))?
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_string()?;

        let response: FetchResponse = serde_json::from_str(&body)?;
        Ok(response.into())
    }

    fn save_dashboard(&self, dashboard: &Dashboard) -> Result<SaveResponse> {
        let url = self.save_url();
        let uid = dashboard.uid().unwrap_or_default();
        log::debug!("POST {url} (uid {uid}, overwrite {})", dashboard.overwrite);

        let request = SaveRequest::from(dashboard);
        let body = self
            .agent
            .post(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .send_json(&request)
            .map_err(|e| Error::from_ureq(e, uid))?
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_string()?;

        Ok(serde_json::from_str(&body)?)
    }
}

// =============================================================================
// Grafana API wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct FetchResponse {
    dashboard: Value,
    #[serde(default)]
    meta: DashboardMeta,
}

impl From<FetchResponse> for Dashboard {
    fn from(r: FetchResponse) -> Self {
        Self {
            model: r.dashboard,
            folder_id: r.meta.folder_id,
            folder_uid: r.meta.folder_uid.clone().filter(|uid| !uid.is_empty()),
            meta: r.meta,
            overwrite: false,
            message: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    dashboard: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_uid: Option<&'a str>,
    overwrite: bool,
    message: &'a str,
}

impl<'a> From<&'a Dashboard> for SaveRequest<'a> {
    fn from(d: &'a Dashboard) -> Self {
        Self {
            dashboard: &d.model,
            folder_id: d.folder_id,
            folder_uid: d.folder_uid.as_deref(),
            overwrite: d.overwrite,
            message: &d.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls() {
        let backend = HttpBackend::new("https://grafana.example.com/", "key").unwrap();
        assert_eq!(backend.base_url(), "https://grafana.example.com");
        assert_eq!(
            backend.dashboard_url("abc"),
            "https://grafana.example.com/api/dashboards/uid/abc"
        );
        assert_eq!(
            backend.save_url(),
            "https://grafana.example.com/api/dashboards/db"
        );
    }

    #[test]
    fn test_dashboard_url_encodes_uid() {
        let backend = HttpBackend::new("http://localhost:3000", "key").unwrap();
        assert_eq!(
            backend.dashboard_url("a/b"),
            "http://localhost:3000/api/dashboards/uid/a%2Fb"
        );
        assert_eq!(
            backend.dashboard_url("x?y"),
            "http://localhost:3000/api/dashboards/uid/x%3Fy"
        );
        assert_eq!(
            backend.dashboard_url("ab-C_9"),
            "http://localhost:3000/api/dashboards/uid/ab-C_9"
        );
    }

    #[test]
    fn test_authorization_header() {
        let backend = HttpBackend::new("http://localhost:3000", "s3cret").unwrap();
        assert_eq!(backend.authorization, "Bearer s3cret");
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(HttpBackend::new("", "k"), Err(Error::InvalidUrl(_))));
        assert!(matches!(HttpBackend::new(" / ", "k"), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            HttpBackend::new("grafana.example.com", "k"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_fetch_response_conversion() {
        let response: FetchResponse = serde_json::from_value(json!({
            "dashboard": {"uid": "abc", "title": "Latency"},
            "meta": {"folderId": 3, "folderUid": "ops", "version": 9}
        }))
        .unwrap();

        let dashboard: Dashboard = response.into();
        assert_eq!(dashboard.title(), Some("Latency"));
        assert_eq!(dashboard.folder_id, Some(3));
        assert_eq!(dashboard.folder_uid.as_deref(), Some("ops"));
        assert_eq!(dashboard.meta.version, Some(9));
    }

    #[test]
    fn test_fetch_response_without_meta() {
        let response: FetchResponse =
            serde_json::from_value(json!({"dashboard": {"uid": "abc"}})).unwrap();
        let dashboard: Dashboard = response.into();
        assert_eq!(dashboard.folder_id, None);
        assert_eq!(dashboard.folder_uid, None);
    }

    #[test]
    fn test_fetch_response_general_folder() {
        let response: FetchResponse = serde_json::from_value(json!({
            "dashboard": {"uid": "abc"},
            "meta": {"folderId": 0, "folderUid": ""}
        }))
        .unwrap();
        let dashboard: Dashboard = response.into();
        assert_eq!(dashboard.folder_id, Some(0));
        assert_eq!(dashboard.folder_uid, None);
    }

    #[test]
    fn test_save_request_body() {
        let mut dashboard = Dashboard::new(json!({"uid": "abc"}));
        dashboard.folder_id = Some(3);
        dashboard.overwrite = true;
        dashboard.message = "patched".to_string();

        let body = serde_json::to_value(SaveRequest::from(&dashboard)).unwrap();
        assert_eq!(
            body,
            json!({
                "dashboard": {"uid": "abc"},
                "folderId": 3,
                "overwrite": true,
                "message": "patched"
            })
        );
    }
}
