use async_trait::async_trait;
use package_network::package_network::domain::{PackageVulnerabilities, Vulnerability};
use package_network::prelude::*;

/// Mock VulnerabilityRepository with a fixed advisory list
#[derive(Clone, Default)]
pub struct MockVulnerabilityRepository {
    pub advisories: Vec<PackageVulnerabilities>,
    pub should_fail: bool,
}

impl MockVulnerabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_advisory(mut self, package: &str, version: &str, id: &str, severity: Severity, score: f32) -> Self {
        let vulnerability = Vulnerability::new(id.to_string(), severity, score, None, None)
            .expect("valid mock vulnerability");
        self.advisories.push(PackageVulnerabilities::new(
            package.to_string(),
            version.to_string(),
            vec![vulnerability],
        ));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            advisories: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn fetch_vulnerabilities(&self, packages: Vec<Package>) -> Result<Vec<PackageVulnerabilities>> {
        if self.should_fail {
            anyhow::bail!("Mock vulnerability repository failure");
        }
        Ok(self
            .advisories
            .iter()
            .filter(|advisory| {
                packages
                    .iter()
                    .any(|p| p.name() == advisory.package_name() && p.version() == advisory.version())
            })
            .cloned()
            .collect())
    }
}
