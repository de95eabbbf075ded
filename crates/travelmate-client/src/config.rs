//! # Client Configuration
//!
//! Where the booking API lives, how long to wait for it, how booking ids are
//! generated, and (optionally) who is signed in.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TRAVELMATE_API_URL=https://api.travelmate.example                  │
//! │     TRAVELMATE_TIMEOUT_SECS=15                                         │
//! │     TRAVELMATE_BOOKING_ID_SCHEME=uuid                                  │
//! │     TRAVELMATE_USER=alice   TRAVELMATE_TOKEN=...                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/travelmate/config.toml (Linux)                           │
//! │     ~/Library/Application Support/com.travelmate.travelmate/ (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000, 30s timeout, timestamp booking ids          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//! timeout_secs = 30
//!
//! [booking]
//! id_scheme = "timestamp"  # timestamp | uuid
//!
//! [session]
//! user_name = "alice"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use travelmate_core::BookingIdScheme;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

pub const ENV_API_URL: &str = "TRAVELMATE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "TRAVELMATE_TIMEOUT_SECS";
pub const ENV_BOOKING_ID_SCHEME: &str = "TRAVELMATE_BOOKING_ID_SCHEME";
pub const ENV_USER: &str = "TRAVELMATE_USER";
pub const ENV_TOKEN: &str = "TRAVELMATE_TOKEN";

// =============================================================================
// API Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the booking REST API; endpoints are appended to its path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// Booking Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    /// How client-side booking ids are generated.
    #[serde(default)]
    pub id_scheme: BookingIdScheme,
}

// =============================================================================
// Session Settings
// =============================================================================

/// Optional signed-in identity. Storing a token here is a convenience for
/// the CLI; the workflow itself only ever sees an explicit [`Session`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("user_name", &self.user_name)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub booking: BookingSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from `lookup` (normally the process environment).
    ///
    /// Unparseable values are ignored with a warning, matching a missing key.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric timeout in environment"),
            }
        }

        if let Some(scheme) = lookup(ENV_BOOKING_ID_SCHEME) {
            match scheme.parse::<BookingIdScheme>() {
                Ok(parsed) => self.booking.id_scheme = parsed,
                Err(_) => warn!(scheme = %scheme, "Unknown booking id scheme in environment"),
            }
        }

        if let Some(user) = lookup(ENV_USER) {
            self.session.user_name = Some(user);
        }

        if let Some(token) = lookup(ENV_TOKEN) {
            self.session.token = Some(token);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "travelmate", "travelmate")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The API base URL, parsed. Only `http` and `https` are accepted.
    pub fn base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.api.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}://",
                other
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn id_scheme(&self) -> BookingIdScheme {
        self.booking.id_scheme
    }

    /// The configured session, if a user name is set.
    pub fn session(&self) -> Option<Session> {
        let user = self.session.user_name.as_deref()?.trim();
        if user.is_empty() {
            return None;
        }
        Some(Session::new(user, self.session.token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.id_scheme(), BookingIdScheme::Timestamp);
        assert!(config.session().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://bookings.example".into();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.api.base_url = "https://api.travelmate.example/v1".into();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.api.timeout_secs = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        config.apply_env_overrides(env(&[
            (ENV_API_URL, "https://api.travelmate.example"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_BOOKING_ID_SCHEME, "uuid"),
            (ENV_USER, "alice"),
            (ENV_TOKEN, "secret-token"),
        ]));

        assert_eq!(config.api.base_url, "https://api.travelmate.example");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.id_scheme(), BookingIdScheme::Uuid);

        let session = config.session().unwrap();
        assert_eq!(session.user_name(), "alice");
        assert_eq!(session.token(), Some("secret-token"));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ClientConfig::default();
        config.apply_env_overrides(env(&[
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_BOOKING_ID_SCHEME, "sequential"),
        ]));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.id_scheme(), BookingIdScheme::Timestamp);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ClientConfig::default();
        config.api.base_url = "https://api.travelmate.example".into();
        config.booking.id_scheme = BookingIdScheme::Uuid;
        config.session.user_name = Some("bob".into());
        config.save(Some(path.clone())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[api]"));
        assert!(written.contains("id_scheme = \"uuid\""));

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: ClientConfig = toml::from_str("[api]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(loaded.api.timeout_secs, 10);
        assert_eq!(loaded.api.base_url, "http://localhost:5000");
        assert_eq!(loaded.booking, BookingSettings::default());
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = SessionSettings {
            user_name: Some("alice".into()),
            token: Some("secret-token".into()),
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("secret-token"));
    }
}
