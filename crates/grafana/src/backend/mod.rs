//! Backend trait and implementations for the dashboard API.
//!
//! [`http::HttpBackend`] talks to a real Grafana instance. [`MockBackend`]
//! keeps dashboards in memory and can be scripted to fail a given number
//! of times, which is how the retry budget is exercised without network
//! access:
//!
//! ```
//! use grafana::backend::{Backend, MockBackend};
//! use grafana::{Dashboard, Error};
//! use serde_json::json;
//!
//! let mock = MockBackend::new();
//! mock.insert("abc", Dashboard::new(json!({"uid": "abc", "title": "Latency"})));
//! mock.fail_fetch(Error::http("timeout", None));
//!
//! assert!(mock.fetch_dashboard("abc").is_err());
//! assert_eq!(mock.fetch_dashboard("abc").unwrap().title(), Some("Latency"));
//! ```

pub mod http;

use crate::error::{Error, Result};
use crate::types::{Dashboard, SaveResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// Operations the client needs from a dashboard store.
pub trait Backend: Send + Sync {
    /// Fetch a dashboard by uid.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no dashboard has this uid.
    fn fetch_dashboard(&self, uid: &str) -> Result<Dashboard>;

    /// Create or update a dashboard.
    ///
    /// The dashboard's `overwrite` flag decides what happens on a version
    /// or identifier conflict: replace when set, `Error::Conflict` otherwise.
    fn save_dashboard(&self, dashboard: &Dashboard) -> Result<SaveResponse>;
}

#[derive(Debug, Default)]
struct MockState {
    dashboards: HashMap<String, Dashboard>,
    fetch_failures: VecDeque<Error>,
    save_failures: VecDeque<Error>,
    conflicting: bool,
    fetch_calls: u32,
    save_calls: u32,
    saved: Vec<Dashboard>,
}

/// In-memory backend for testing.
///
/// Clones share state, so a test can hand one clone to a client and keep
/// another to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Create a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only happens after a panicking test, keep going
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store a dashboard under `uid`.
    pub fn insert(&self, uid: impl Into<String>, dashboard: Dashboard) {
        self.state().dashboards.insert(uid.into(), dashboard);
    }

    /// Make the next fetch fail with `error`. Failures queue up.
    pub fn fail_fetch(&self, error: Error) {
        self.state().fetch_failures.push_back(error);
    }

    /// Make the next `times` fetches fail with copies of `error`.
    pub fn fail_fetch_times(&self, times: u32, error: &Error) {
        for _ in 0..times {
            self.fail_fetch(error.clone());
        }
    }

    /// Make the next save fail with `error`. Failures queue up.
    pub fn fail_save(&self, error: Error) {
        self.state().save_failures.push_back(error);
    }

    /// Make the next `times` saves fail with copies of `error`.
    pub fn fail_save_times(&self, times: u32, error: &Error) {
        for _ in 0..times {
            self.fail_save(error.clone());
        }
    }

    /// Simulate a newer version at the destination, so saves without
    /// `overwrite` are refused.
    pub fn set_conflicting(&self, conflicting: bool) {
        self.state().conflicting = conflicting;
    }

    /// Number of fetch calls seen, failed ones included.
    #[must_use]
    pub fn fetch_calls(&self) -> u32 {
        self.state().fetch_calls
    }

    /// Number of save calls seen, failed ones included.
    #[must_use]
    pub fn save_calls(&self) -> u32 {
        self.state().save_calls
    }

    /// Dashboards accepted by successful saves, in order.
    #[must_use]
    pub fn saved(&self) -> Vec<Dashboard> {
        self.state().saved.clone()
    }

    /// Current stored dashboard for `uid`.
    #[must_use]
    pub fn get(&self, uid: &str) -> Option<Dashboard> {
        self.state().dashboards.get(uid).cloned()
    }
}

impl Backend for MockBackend {
    fn fetch_dashboard(&self, uid: &str) -> Result<Dashboard> {
        let mut state = self.state();
        state.fetch_calls += 1;

        if let Some(err) = state.fetch_failures.pop_front() {
            return Err(err);
        }

        state
            .dashboards
            .get(uid)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                uid: uid.to_string(),
            })
    }

    fn save_dashboard(&self, dashboard: &Dashboard) -> Result<SaveResponse> {
        let mut state = self.state();
        state.save_calls += 1;

        if let Some(err) = state.save_failures.pop_front() {
            return Err(err);
        }

        let uid = dashboard.uid().unwrap_or_default().to_string();

        if state.conflicting && !dashboard.overwrite {
            return Err(Error::Conflict {
                message: format!("dashboard {uid} has been changed by someone else"),
            });
        }

        let version = state
            .dashboards
            .get(&uid)
            .and_then(|d| d.meta.version)
            .unwrap_or(0)
            + 1;

        let mut stored = dashboard.clone();
        stored.meta.version = Some(version);
        state.dashboards.insert(uid.clone(), stored);
        state.saved.push(dashboard.clone());
        state.conflicting = false;

        Ok(SaveResponse {
            id: 1,
            url: format!("/d/{uid}"),
            uid,
            status: "success".to_string(),
            version,
            slug: String::new(),
        })
    }
}
