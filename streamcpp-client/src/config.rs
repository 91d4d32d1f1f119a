//! Credential and settings loading.
//!
//! The StreamCpp endpoint authenticates with four values captured from a
//! real editor session: the bearer token, request id, session id, and
//! client version. Each is read from the environment first, then from a
//! `settings.toml` under the user config directory
//! (`~/.config/streamcpp/settings.toml` on Linux). All four are required
//! and validated before any network call.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Environment variable for the bearer token.
pub const BEARER_TOKEN_VAR: &str = "CURSOR_BEARER_TOKEN";
/// Environment variable for the request id header.
pub const REQUEST_ID_VAR: &str = "X_REQUEST_ID";
/// Environment variable for the session id header.
pub const SESSION_ID_VAR: &str = "X_SESSION_ID";
/// Environment variable for the client version header.
pub const CLIENT_VERSION_VAR: &str = "X_CURSOR_CLIENT_VERSION";

/// On-disk settings (`settings.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Captured session credentials.
    pub credentials: CredentialSettings,
}

/// The `[credentials]` table. Every field is optional here; requiredness is
/// enforced when resolving [`Credentials`], where the environment can still
/// fill the gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    pub bearer_token: Option<String>,
    pub request_id: Option<String>,
    pub session_id: Option<String>,
    pub client_version: Option<String>,
}

impl Settings {
    /// Load settings from the default path. A missing file is not an
    /// error; it yields default (empty) settings.
    pub fn load() -> Result<Self, ClientError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ClientError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Returns the default settings file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("streamcpp")
            .join("settings.toml")
    }
}

/// Resolved, validated session credentials.
///
/// The client treats these as opaque header values; nothing is parsed out
/// of them. The bearer token is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// `authorization: Bearer …` value, without the `Bearer ` prefix.
    pub bearer_token: String,
    /// `x-request-id` header value.
    pub request_id: String,
    /// `x-session-id` header value.
    pub session_id: String,
    /// `x-cursor-client-version` header value.
    pub client_version: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &"<redacted>")
            .field("request_id", &self.request_id)
            .field("session_id", &self.session_id)
            .field("client_version", &self.client_version)
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the environment, falling back to the given
    /// settings. Fails on the first missing value, naming the variable to
    /// set.
    pub fn resolve(settings: &Settings) -> Result<Self, ClientError> {
        let creds = &settings.credentials;
        Ok(Self {
            bearer_token: lookup(
                std::env::var(BEARER_TOKEN_VAR).ok(),
                &creds.bearer_token,
                BEARER_TOKEN_VAR,
            )?,
            request_id: lookup(
                std::env::var(REQUEST_ID_VAR).ok(),
                &creds.request_id,
                REQUEST_ID_VAR,
            )?,
            session_id: lookup(
                std::env::var(SESSION_ID_VAR).ok(),
                &creds.session_id,
                SESSION_ID_VAR,
            )?,
            client_version: lookup(
                std::env::var(CLIENT_VERSION_VAR).ok(),
                &creds.client_version,
                CLIENT_VERSION_VAR,
            )?,
        })
    }

    /// Resolve credentials from default-path settings plus the environment.
    pub fn load() -> Result<Self, ClientError> {
        Self::resolve(&Settings::load()?)
    }
}

/// Pick the environment value when present and non-empty, else the settings
/// value; error with the variable name when both are absent.
fn lookup(
    env_value: Option<String>,
    fallback: &Option<String>,
    var: &str,
) -> Result<String, ClientError> {
    if let Some(value) = env_value {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    fallback
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            ClientError::Config(format!(
                "missing credential: set {var} or add it to {}",
                Settings::default_path().display()
            ))
        })
}
