use crate::package_network::domain::{Package, PackageVulnerabilities};
use crate::shared::Result;
use async_trait::async_trait;

/// VulnerabilityRepository port for fetching known vulnerabilities
///
/// This port abstracts the vulnerability database (e.g., OSV) used to
/// look up advisories for a batch of packages.
#[async_trait]
pub trait VulnerabilityRepository: Send + Sync {
    /// Fetches vulnerabilities for the given packages
    ///
    /// Packages without known vulnerabilities may be omitted from the result.
    ///
    /// # Errors
    /// Returns an error if the upstream query fails as a whole
    async fn fetch_vulnerabilities(
        &self,
        packages: Vec<Package>,
    ) -> Result<Vec<PackageVulnerabilities>>;
}
