use super::ManifestFormat;
use crate::package_network::domain::{Ecosystem, Package, LATEST_VERSION};
use crate::package_network::services::exact_semver;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    dependencies: Map<String, Value>,
    #[serde(default)]
    dev_dependencies: Map<String, Value>,
}

/// npm `package.json` manifests
pub struct PackageJsonFormat;

impl PackageJsonFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PackageJsonFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestFormat for PackageJsonFormat {
    fn supports_file(&self, file_name: &str) -> bool {
        file_name == "package.json"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn parse_content(&self, content: &str) -> Result<Vec<Package>> {
        let manifest: PackageJson =
            serde_json::from_str(content).context("Failed to parse package.json")?;

        manifest
            .dependencies
            .iter()
            .chain(manifest.dev_dependencies.iter())
            .map(|(name, spec)| {
                let version = spec
                    .as_str()
                    .and_then(exact_semver)
                    .unwrap_or_else(|| LATEST_VERSION.to_string());
                Package::with_ecosystem(name.clone(), version, Ecosystem::Npm)
                    .with_context(|| format!("dependency '{}'", name))
            })
            .collect()
    }
}
