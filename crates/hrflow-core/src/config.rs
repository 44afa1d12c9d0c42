//! Configuration loading.
//!
//! Sources are layered, later ones winning:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config`, else `$XDG_CONFIG_HOME/hrflow/config.toml` if it exists)
//! 3. environment: `HRFLOW_API_URL`, `HRFLOW_SESSION`, `HRFLOW_TIMEOUT_SECS`, `HRFLOW_WORKFLOWS`
//! 4. explicit overrides (command-line flags)
//!
//! ```toml
//! workflows_file = "/etc/hrflow/workflows.toml"
//!
//! [api]
//! base_url = "https://hr.example.co.id/api"
//! session_cookie = "connect.sid=s%3A..."
//! timeout_secs = 30
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::debug;
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{ApprovalError, ConfigResultExt, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the Approval API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    /// Opaque session cookie forwarded on every request
    pub session_cookie: Option<SecretString>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            session_cookie: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Complete runtime configuration.
#[derive(Clone, Debug, Default)]
pub struct HrflowConfig {
    pub api: ApiConfig,
    /// TOML workflow catalog replacing the built-in one
    pub workflows_file: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub workflows_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api: Option<ApiPatch>,
    workflows_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiPatch {
    base_url: Option<String>,
    session_cookie: Option<String>,
    timeout_secs: Option<u64>,
}

impl HrflowConfig {
    /// Loads configuration from file, process environment and overrides.
    pub fn load(options: LoadOptions) -> Result<Self> {
        Self::load_with_env(options, |key| env::var(key).ok())
    }

    /// Same as [`HrflowConfig::load`] with an explicit environment lookup.
    pub fn load_with_env<F>(options: LoadOptions, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = match options.config_path {
            Some(path) => Some(path),
            None => Self::default_config_path(),
        };
        if let Some(path) = path {
            config.apply_file(&path)?;
        }

        config.apply_env(lookup)?;
        config.apply_overrides(options.overrides);
        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/hrflow/config.toml`, when present.
    fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("hrflow").find_config_file("config.toml")
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        debug!("Reading configuration from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| ApprovalError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: ConfigFile = toml::from_str(&text)
            .config_context(format!("Invalid config file '{}'", path.display()))?;

        if let Some(api) = file.api {
            if let Some(base_url) = api.base_url {
                self.api.base_url = base_url;
            }
            if let Some(cookie) = api.session_cookie {
                self.api.session_cookie = Some(cookie.into());
            }
            if let Some(timeout) = api.timeout_secs {
                self.api.timeout_secs = timeout;
            }
        }
        if let Some(workflows_file) = file.workflows_file {
            self.workflows_file = Some(resolve_relative(path, workflows_file));
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HRFLOW_API_URL") {
            self.api.base_url = url;
        }
        if let Some(cookie) = lookup("HRFLOW_SESSION") {
            self.api.session_cookie = Some(cookie.into());
        }
        if let Some(timeout) = lookup("HRFLOW_TIMEOUT_SECS") {
            self.api.timeout_secs = timeout
                .trim()
                .parse()
                .config_context(format!("Invalid HRFLOW_TIMEOUT_SECS '{timeout}'"))?;
        }
        if let Some(workflows) = lookup("HRFLOW_WORKFLOWS") {
            self.workflows_file = Some(PathBuf::from(workflows));
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.api_url {
            self.api.base_url = url;
        }
        if let Some(workflows) = overrides.workflows_file {
            self.workflows_file = Some(workflows);
        }
    }

    fn validate(&self) -> Result<()> {
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApprovalError::invalid_input("api.base_url")
                .with_reason(format!("'{url}' must start with http:// or https://")));
        }
        if self.api.timeout_secs == 0 {
            return Err(ApprovalError::invalid_input("api.timeout_secs")
                .with_reason("must be greater than zero"));
        }
        Ok(())
    }
}

/// Relative catalog paths in a config file are relative to that file.
fn resolve_relative(config_path: &Path, target: PathBuf) -> PathBuf {
    if target.is_absolute() {
        return target;
    }
    match config_path.parent() {
        Some(dir) => dir.join(target),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_file_values_applied() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            workflows_file = "workflows.toml"

            [api]
            base_url = "https://hr.example.co.id/api"
            session_cookie = "connect.sid=abc"
            timeout_secs = 5
            "#,
        );

        let config = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(path),
                ..Default::default()
            },
            no_env,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://hr.example.co.id/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(
            config.api.session_cookie.as_ref().map(|c| c.expose_secret().to_string()),
            Some("connect.sid=abc".to_string())
        );
        assert_eq!(config.workflows_file, Some(dir.path().join("workflows.toml")));
    }

    #[test]
    fn test_env_then_overrides_win() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api]\nbase_url = \"https://file.example/api\"\n");
        let env: HashMap<&str, &str> = HashMap::from([
            ("HRFLOW_API_URL", "https://env.example/api"),
            ("HRFLOW_TIMEOUT_SECS", "12"),
        ]);

        let config = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(path.clone()),
                overrides: ConfigOverrides::default(),
            },
            |key| env.get(key).map(|v| v.to_string()),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://env.example/api");
        assert_eq!(config.api.timeout_secs, 12);

        let config = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    api_url: Some("https://flag.example/api".to_string()),
                    workflows_file: None,
                },
            },
            |key| env.get(key).map(|v| v.to_string()),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://flag.example/api");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(PathBuf::from("/nonexistent/hrflow.toml")),
                ..Default::default()
            },
            no_env,
        )
        .unwrap_err();
        assert!(matches!(err, ApprovalError::FileSystem { .. }));

        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api]\nbase_url = \"hr.example\"\n");
        let err = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(path),
                ..Default::default()
            },
            no_env,
        )
        .unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_bad_timeout_env() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let err = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(path),
                ..Default::default()
            },
            |key| (key == "HRFLOW_TIMEOUT_SECS").then(|| "soon".to_string()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("HRFLOW_TIMEOUT_SECS"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api]\nbase_uri = \"https://x\"\n");
        let err = HrflowConfig::load_with_env(
            LoadOptions {
                config_path: Some(path),
                ..Default::default()
            },
            no_env,
        )
        .unwrap_err();
        assert!(matches!(err, ApprovalError::Configuration { .. }));
    }
}
