//! One fetch, substitute, save round trip.
//!
//! Retries are the client's business. Every error here ends the run, and
//! a failure before the save leaves the remote dashboard untouched.

use crate::config::Config;
use crate::engine;
use crate::error::{Error, Result};
use crate::message::audit_message;
use grafana::{Client, Dashboard, SaveResponse};
use serde_json::Value;

/// A fetched dashboard with its rewritten model, ready to save.
#[derive(Debug, Clone)]
pub struct Patch {
    /// Model as fetched.
    pub before: Value,
    /// Dashboard carrying the new model, overwrite flag and message.
    pub dashboard: Dashboard,
}

impl Patch {
    /// Whether any rule matched.
    pub fn changed(&self) -> bool {
        self.before != self.dashboard.model
    }
}

/// Fetch the dashboard and apply the replacements, without saving.
pub fn prepare(client: &Client, config: &Config) -> Result<Patch> {
    log::info!("Fetching dashboard {}", config.uid);
    let mut dashboard =
        client
            .dashboard_by_uid(&config.uid)
            .map_err(|source| Error::RemoteFetch {
                uid: config.uid.clone(),
                source,
            })?;

    log::info!(
        "Applying {} replacement(s) to '{}'",
        config.replacements.len(),
        dashboard.title().unwrap_or(&config.uid)
    );
    let model = engine::substitute(&dashboard.model, &config.replacements)?;

    let before = std::mem::replace(&mut dashboard.model, model);
    dashboard.overwrite = config.overwrite;
    dashboard.message = audit_message(&config.replacements);

    Ok(Patch { before, dashboard })
}

/// Save a prepared patch.
pub fn publish(client: &Client, config: &Config, patch: &Patch) -> Result<SaveResponse> {
    if !patch.changed() {
        log::warn!("No replacement matched, saving dashboard unchanged");
    }

    log::info!(
        "Saving dashboard {} (overwrite: {})",
        config.uid,
        patch.dashboard.overwrite
    );
    let response = client
        .save_dashboard(&patch.dashboard)
        .map_err(|source| Error::RemoteWrite {
            uid: config.uid.clone(),
            source,
        })?;

    log::debug!(
        "Saved dashboard {} as version {} ({})",
        response.uid,
        response.version,
        response.status
    );
    Ok(response)
}

/// Full round trip: fetch, substitute, save.
pub fn run(client: &Client, config: &Config) -> Result<SaveResponse> {
    let patch = prepare(client, config)?;
    publish(client, config, &patch)
}
