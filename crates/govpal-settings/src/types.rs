//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`
//! so a settings file may be partial — missing fields get their compiled
//! default during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings for the GovPal engine and server.
///
/// Loaded from `~/.govpal/settings.json` with defaults applied for
/// missing fields. `GOVPAL_*` environment variables override specific
/// values after the file is merged.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovpalSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Manifest collaborator settings.
    pub manifest: ManifestSettings,
    /// Session defaults and limits.
    pub session: SessionSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for GovpalSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "govpal".to_string(),
            server: ServerSettings::default(),
            manifest: ManifestSettings::default(),
            session: SessionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl GovpalSettings {
    /// Correct invalid invariants in place.
    ///
    /// Called automatically during loading. Out-of-range values are
    /// corrected with a warning rather than rejected, so users get
    /// working behavior instead of a startup error.
    pub fn validate(&mut self) {
        if self.session.max_sessions == 0 {
            tracing::warn!("maxSessions of 0 would reject every session, correcting to 1");
            self.session.max_sessions = 1;
        }
        if self.server.body_limit_bytes == 0 {
            let fallback = ServerSettings::default().body_limit_bytes;
            tracing::warn!("bodyLimitBytes of 0 would reject every request, correcting to {fallback}");
            self.server.body_limit_bytes = fallback;
        }
    }
}

/// HTTP server network settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
            request_timeout_ms: 30_000,
            body_limit_bytes: 1_048_576,
        }
    }
}

/// Manifest collaborator settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestSettings {
    /// Collaborator base URL. `None` serves built-in manifests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Session defaults and limits.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSettings {
    /// Department used when a session request names none.
    pub default_department: String,
    /// Role used when a session request names none.
    pub default_role: String,
    /// Maximum number of concurrently registered sessions.
    pub max_sessions: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_department: "planning".to_string(),
            default_role: "viewer".to_string(),
            max_sessions: 1000,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter directive (overridden by `RUST_LOG`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
