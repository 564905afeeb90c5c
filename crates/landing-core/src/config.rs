//! Landing page configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::context::FormKind;
use crate::error::ConfigError;

/// Backend origin the page talks to.
pub const DEFAULT_BASE_URL: &str = "https://sgndlkjpbuqcgskhygrq.supabase.co";
/// Waitlist edge function path.
pub const DEFAULT_WAITLIST_PATH: &str = "/functions/v1/join-waitlist";
/// Contact edge function path.
pub const DEFAULT_CONTACT_PATH: &str = "/functions/v1/submit-contact";
/// Success messages hide after this many milliseconds.
pub const DEFAULT_SUCCESS_HIDE_MS: u64 = 5000;

/// File names searched for by [`LandingConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["landing.toml", ".landing.toml", "landing.json"];

/// Complete configuration, passed explicitly to the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Backend origin and edge function paths.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Status message behavior.
    #[serde(default)]
    pub status: StatusConfig,

    /// Analytics reporting.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Backend origin and endpoint paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin, e.g. `https://project.supabase.co`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the waitlist edge function.
    #[serde(default = "default_waitlist_path")]
    pub waitlist_path: String,

    /// Path of the contact edge function.
    #[serde(default = "default_contact_path")]
    pub contact_path: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_waitlist_path() -> String {
    DEFAULT_WAITLIST_PATH.to_string()
}

fn default_contact_path() -> String {
    DEFAULT_CONTACT_PATH.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            waitlist_path: default_waitlist_path(),
            contact_path: default_contact_path(),
        }
    }
}

impl BackendConfig {
    /// Create a backend config for an origin with the default paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Path of the edge function serving a form.
    pub fn path_for(&self, kind: FormKind) -> &str {
        match kind {
            FormKind::Waitlist => &self.waitlist_path,
            FormKind::Contact => &self.contact_path,
        }
    }

    /// Absolute URL of the edge function serving a form.
    pub fn endpoint_url(&self, kind: FormKind) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path_for(kind))
    }
}

/// Status region behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Delay before a success message hides itself.
    #[serde(default = "default_success_hide_ms")]
    pub success_hide_ms: u64,
}

fn default_success_hide_ms() -> u64 {
    DEFAULT_SUCCESS_HIDE_MS
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            success_hide_ms: default_success_hide_ms(),
        }
    }
}

impl StatusConfig {
    /// Success auto-hide delay as a `Duration`.
    pub fn success_hide_delay(&self) -> Duration {
        Duration::from_millis(self.success_hide_ms)
    }
}

/// Analytics reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Emit conversion events after successful submissions.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LandingConfig {
    /// Create a config pointing at an origin, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig::new(base_url),
            ..Self::default()
        }
    }

    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to a file, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            self.to_toml_string()?
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Find a config file in `start` or any of its parents.
    ///
    /// Files that fail to parse are skipped.
    pub fn discover(start: &Path) -> Option<(PathBuf, Self)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    if let Ok(config) = Self::load(&candidate) {
                        return Some((candidate, config));
                    }
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply `PERSIST_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply `PERSIST_*` overrides from an arbitrary lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("PERSIST_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Some(path) = lookup("PERSIST_WAITLIST_PATH") {
            self.backend.waitlist_path = path;
        }
        if let Some(path) = lookup("PERSIST_CONTACT_PATH") {
            self.backend.contact_path = path;
        }
        if let Some(ms) = lookup("PERSIST_SUCCESS_HIDE_MS") {
            self.status.success_hide_ms =
                ms.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        var: "PERSIST_SUCCESS_HIDE_MS".to_string(),
                        value: ms.clone(),
                    })?;
        }
        Ok(self)
    }

    /// Check that the origin and paths can form request URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.backend.base_url;
        let has_host = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .is_some_and(|rest| !rest.trim_end_matches('/').is_empty());
        if !has_host {
            return Err(ConfigError::Invalid {
                field: "backend.base_url",
                reason: format!("expected an http(s) origin, got '{}'", base),
            });
        }

        for (field, path) in [
            ("backend.waitlist_path", &self.backend.waitlist_path),
            ("backend.contact_path", &self.backend.contact_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("path must start with '/', got '{}'", path),
                });
            }
        }

        Ok(())
    }
}
