//! Configuration file support for package-network.
//!
//! Provides YAML-based configuration through `package-network.config.yml`
//! files, including data structures, file loading, validation and the
//! layering of file values under command-line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use package_network::application::dto::{OutputFormat, DEFAULT_MAX_LEVELS};
use package_network::application::use_cases::{DEFAULT_MAX_CONCURRENT, DEFAULT_REQUEST_TIMEOUT};
use package_network::package_network::domain::Severity;
use package_network::shared::Result;

pub const CONFIG_FILENAME: &str = "package-network.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub max_levels: Option<usize>,
    pub format: Option<OutputFormat>,
    pub request_timeout_secs: Option<u64>,
    pub max_concurrent_requests: Option<usize>,
    pub fail_on: Option<String>,
    pub check_vulnerabilities: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty document deserializes as unit, not as an empty mapping
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.request_timeout_secs == Some(0) {
        bail!(
            "Invalid config: request_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Use a timeout in seconds, e.g. `request_timeout_secs: 10`."
        );
    }
    if config.max_concurrent_requests == Some(0) {
        bail!(
            "Invalid config: max_concurrent_requests must be greater than 0.\n\n\
             💡 Hint: Use at least 1, e.g. `max_concurrent_requests: 10`."
        );
    }
    if let Some(ref fail_on) = config.fail_on {
        if let Err(e) = Severity::from_str(fail_on) {
            bail!(
                "Invalid config: fail_on {}\n\n\
                 💡 Hint: Use one of CRITICAL, HIGH, MEDIUM, LOW.",
                e
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored", key);
    }
}

/// Effective settings for one run after layering defaults, file and flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub max_levels: usize,
    pub format: OutputFormat,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub fail_on: Option<Severity>,
    pub check_vulnerabilities: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            format: OutputFormat::Json,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT,
            fail_on: None,
            check_vulnerabilities: true,
        }
    }
}

impl Settings {
    /// Overlays the values present in a validated config file
    pub fn with_config(mut self, config: &ConfigFile) -> Result<Self> {
        if let Some(max_levels) = config.max_levels {
            self.max_levels = max_levels;
        }
        if let Some(format) = config.format {
            self.format = format;
        }
        if let Some(secs) = config.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max_concurrent) = config.max_concurrent_requests {
            self.max_concurrent_requests = max_concurrent;
        }
        if let Some(ref fail_on) = config.fail_on {
            self.fail_on = Some(Severity::from_str(fail_on).map_err(anyhow::Error::msg)?);
        }
        if let Some(check) = config.check_vulnerabilities {
            self.check_vulnerabilities = check;
        }
        Ok(self)
    }
}
