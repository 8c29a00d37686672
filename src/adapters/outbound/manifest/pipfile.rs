use super::ManifestFormat;
use crate::package_network::domain::{Ecosystem, Package, LATEST_VERSION};
use crate::package_network::services::pinned_version;
use crate::shared::Result;
use anyhow::Context;

const SECTIONS: [&str; 2] = ["packages", "dev-packages"];

/// Pipenv `Pipfile` manifests
pub struct PipfileFormat;

impl PipfileFormat {
    pub fn new() -> Self {
        Self
    }

    /// `"==1.0"`, `"*"` or `{ version = "==1.0", extras = [...] }`
    fn version_of(value: &toml::Value) -> String {
        match value {
            toml::Value::String(spec) => pinned_version(spec),
            toml::Value::Table(table) => table
                .get("version")
                .and_then(|v| v.as_str())
                .map(pinned_version)
                .unwrap_or_else(|| LATEST_VERSION.to_string()),
            _ => LATEST_VERSION.to_string(),
        }
    }
}

impl Default for PipfileFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestFormat for PipfileFormat {
    fn supports_file(&self, file_name: &str) -> bool {
        file_name == "Pipfile"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPI
    }

    fn parse_content(&self, content: &str) -> Result<Vec<Package>> {
        let document: toml::Table =
            toml::from_str(content).context("Failed to parse Pipfile as TOML")?;

        let mut packages = Vec::new();
        for section in SECTIONS {
            let Some(table) = document.get(section).and_then(|s| s.as_table()) else {
                continue;
            };
            for (name, value) in table {
                let package =
                    Package::with_ecosystem(name.clone(), Self::version_of(value), Ecosystem::PyPI)
                        .with_context(|| format!("[{}] entry '{}'", section, name))?;
                packages.push(package);
            }
        }

        Ok(packages)
    }
}
