use thiserror::Error;

/// Failures of a patch run, one variant per stage.
///
/// None of these are recovered locally. Transport retries happen inside the
/// `grafana` client before a `RemoteFetch`/`RemoteWrite` surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    /// Required input missing or unusable, detected before any network call.
    #[error("bad config: {0}")]
    Config(String),

    /// A `--replace` entry without the separator, or with an empty key.
    #[error("malformed replacement '{entry}': {reason}")]
    MalformedReplacement { entry: String, reason: String },

    /// Fetching the dashboard failed.
    #[error("unable to fetch dashboard {uid}")]
    RemoteFetch {
        uid: String,
        #[source]
        source: grafana::Error,
    },

    /// Saving the dashboard failed.
    #[error("unable to save dashboard {uid}")]
    RemoteWrite {
        uid: String,
        #[source]
        source: grafana::Error,
    },

    /// The fetched model could not be serialized.
    #[error("unable to serialize dashboard model")]
    Serialization(#[source] serde_json::Error),

    /// The substituted text is no longer a valid dashboard model.
    #[error("replacements produced an invalid dashboard model: {reason}")]
    MalformedResult { reason: String },
}

impl Error {
    /// Client error behind a remote failure, if any.
    pub fn remote(&self) -> Option<&grafana::Error> {
        match self {
            Self::RemoteFetch { source, .. } | Self::RemoteWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
