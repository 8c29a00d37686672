use crate::package_network::domain::{Ecosystem, Package};
use crate::package_network::services::Requirement;
use crate::ports::outbound::{DependencyRepository, RequiredPackage};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const PYPI_BASE_URL: &str = "https://pypi.org/pypi";

#[derive(Debug, Deserialize)]
struct PyPiPackageInfo {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

/// PyPiDependencyRepository adapter for reading direct dependencies from PyPI
///
/// Implements the DependencyRepository port for the PyPI ecosystem using the
/// JSON API's `info.requires_dist` field. Requirements that only apply with
/// an extra selected are skipped.
pub struct PyPiDependencyRepository {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl PyPiDependencyRepository {
    /// Creates a new PyPI repository with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let user_agent = format!("package-network/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: PYPI_BASE_URL.to_string(),
            max_retries: 3,
        })
    }

    /// Points the repository at a PyPI-compatible mirror
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn package_url(&self, package: &Package) -> Result<String> {
        validate_url_component(package.name(), "Package name")?;
        let name = urlencoding::encode(package.name());

        if package.is_latest() {
            return Ok(format!("{}/{}/json", self.base_url, name));
        }
        validate_url_component(package.version(), "Version")?;
        Ok(format!(
            "{}/{}/{}/json",
            self.base_url,
            name,
            urlencoding::encode(package.version())
        ))
    }

    /// Fetches package information, retrying transient failures
    ///
    /// Returns `None` when PyPI does not know the package or version.
    async fn fetch_with_retry(&self, url: &str) -> Result<Option<PyPiPackageInfo>> {
        let mut attempt = 1;
        loop {
            match self.fetch_from_pypi(url).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < self.max_retries => {
                    tracing::debug!(url, attempt, error = %e, "Retrying PyPI request");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_from_pypi(&self, url: &str) -> Result<Option<PyPiPackageInfo>> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("PyPI API returned status code {}", response.status());
        }

        Ok(Some(response.json().await?))
    }
}

/// Converts `requires_dist` entries into direct requirements
fn required_packages(requires_dist: &[String]) -> Vec<RequiredPackage> {
    requires_dist
        .iter()
        .filter_map(|entry| Requirement::parse(entry))
        .filter(|requirement| !requirement.is_extra_only())
        .map(|requirement| RequiredPackage::new(requirement.name(), requirement.pinned_version()))
        .collect()
}

#[async_trait]
impl DependencyRepository for PyPiDependencyRepository {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPI
    }

    async fn fetch_direct_dependencies(&self, package: &Package) -> Result<Vec<RequiredPackage>> {
        let url = self.package_url(package)?;

        match self.fetch_with_retry(&url).await? {
            Some(info) => Ok(required_packages(
                info.info.requires_dist.as_deref().unwrap_or_default(),
            )),
            None => {
                tracing::warn!(package = %package, "Package not found on PyPI");
                Ok(Vec::new())
            }
        }
    }
}
