//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use landing_core::LandingConfig;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration.
    pub config: LandingConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from the config file, environment and flags.
    pub fn load(config_path: Option<&Path>, base_url: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let (config_path, config) = resolve_config(
            config_path,
            &cwd,
            base_url,
            |var| std::env::var(var).ok(),
        )?;

        match &config_path {
            Some(path) => output.debug(&format!("Using config {}", path.display())),
            None => output.debug("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }
}

/// Layer config sources: file (explicit or discovered), then `PERSIST_*`
/// variables, then `--base-url`.
fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
    base_url: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(Option<PathBuf>, LandingConfig)> {
    let (path, config) = match explicit {
        Some(path) => {
            let config = LandingConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            (Some(path.to_path_buf()), config)
        }
        None => match LandingConfig::discover(cwd) {
            Some((path, config)) => (Some(path), config),
            None => (None, LandingConfig::default()),
        },
    };

    let mut config = config
        .with_overrides(lookup)
        .context("Invalid environment override")?;
    if let Some(url) = base_url {
        config.backend.base_url = url.to_string();
    }
    config.validate().context("Invalid configuration")?;

    Ok((path, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use landing_core::DEFAULT_BASE_URL;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let (path, config) = resolve_config(None, dir.path(), None, no_env).unwrap();
        assert!(path.is_none());
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("landing.toml"),
            "[backend]\nbase_url = \"https://file.example\"\ncontact_path = \"/contact\"\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = [("PERSIST_BASE_URL", "https://env.example")].into();
        let lookup = |var: &str| env.get(var).map(|v| v.to_string());

        let (path, config) = resolve_config(None, dir.path(), None, lookup).unwrap();
        assert_eq!(path, Some(dir.path().join("landing.toml")));
        assert_eq!(config.backend.base_url, "https://env.example");
        assert_eq!(config.backend.contact_path, "/contact");

        let (_, config) =
            resolve_config(None, dir.path(), Some("http://localhost:54321"), lookup).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:54321");
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_config(None, dir.path(), Some("ftp://nope"), no_env).unwrap_err();
        assert!(format!("{:#}", err).contains("backend.base_url"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), dir.path(), None, no_env).is_err());
    }
}
