use crate::package_network::domain::{Ecosystem, Package, LATEST_VERSION};
use crate::package_network::services::exact_semver;
use crate::ports::outbound::{DependencyRepository, RequiredPackage};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

#[derive(Debug, Deserialize)]
struct NpmVersionManifest {
    #[serde(default)]
    dependencies: Map<String, Value>,
}

/// NpmDependencyRepository adapter for reading direct dependencies from the npm registry
///
/// Queries `/{name}/{version}`, or `/{name}/latest` for the `"*"` sentinel,
/// and reads the `dependencies` object of that version manifest.
pub struct NpmDependencyRepository {
    client: reqwest::Client,
    base_url: String,
}

impl NpmDependencyRepository {
    pub fn new(timeout: Duration) -> Result<Self> {
        let user_agent = format!("package-network/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: NPM_REGISTRY_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn version_url(&self, package: &Package) -> Result<String> {
        validate_url_component(package.name(), "Package name")?;
        // scoped names are requested as a single encoded path segment
        let name = urlencoding::encode(package.name());

        let version = if package.is_latest() {
            "latest"
        } else {
            validate_url_component(package.version(), "Version")?;
            package.version()
        };
        Ok(format!(
            "{}/{}/{}",
            self.base_url,
            name,
            urlencoding::encode(version)
        ))
    }
}

fn required_packages(dependencies: &Map<String, Value>) -> Vec<RequiredPackage> {
    dependencies
        .iter()
        .map(|(name, spec)| {
            let version = spec
                .as_str()
                .and_then(exact_semver)
                .unwrap_or_else(|| LATEST_VERSION.to_string());
            RequiredPackage::new(name.clone(), version)
        })
        .collect()
}

#[async_trait]
impl DependencyRepository for NpmDependencyRepository {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    async fn fetch_direct_dependencies(&self, package: &Package) -> Result<Vec<RequiredPackage>> {
        let url = self.version_url(package)?;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!(package = %package, "Package not found on npm registry");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            anyhow::bail!("npm registry returned status code {}", response.status());
        }

        let manifest: NpmVersionManifest = response.json().await?;
        Ok(required_packages(&manifest.dependencies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> Package {
        Package::with_ecosystem(name.to_string(), version.to_string(), Ecosystem::Npm).unwrap()
    }

    #[test]
    fn test_version_url_forms() {
        let client = NpmDependencyRepository::new(Duration::from_secs(10)).unwrap();

        assert_eq!(
            client.version_url(&pkg("express", "4.17.1")).unwrap(),
            "https://registry.npmjs.org/express/4.17.1"
        );
        assert_eq!(
            client.version_url(&pkg("express", "*")).unwrap(),
            "https://registry.npmjs.org/express/latest"
        );
        assert_eq!(
            client.version_url(&pkg("@types/node", "18.0.0")).unwrap(),
            "https://registry.npmjs.org/%40types%2Fnode/18.0.0"
        );
    }

    #[test]
    fn test_required_packages() {
        let manifest: NpmVersionManifest = serde_json::from_str(
            r#"{
                "name": "express",
                "version": "4.17.1",
                "dependencies": {"accepts": "~1.3.7", "cookie": "0.4.0"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            required_packages(&manifest.dependencies),
            vec![
                RequiredPackage::new("accepts", "*"),
                RequiredPackage::new("cookie", "0.4.0"),
            ]
        );
    }

    #[test]
    fn test_manifest_without_dependencies() {
        let manifest: NpmVersionManifest =
            serde_json::from_str(r#"{"name": "left-pad", "version": "1.3.0"}"#).unwrap();
        assert!(required_packages(&manifest.dependencies).is_empty());
    }
}
