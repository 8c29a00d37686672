use crate::package_network::domain::{Package, Vulnerability, VulnerabilitySummary};
use crate::ports::outbound::VulnerabilityRepository;
use std::collections::HashMap;
use std::time::Duration;

/// Default bound on one annotation batch, covering the batch query and all detail lookups
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(120);

/// VulnerabilityAnnotator - attaches known vulnerabilities to packages
///
/// Annotation is fail-open: an upstream error or timeout is logged and the
/// affected batch comes back without vulnerability data.
///
/// # Type Parameters
/// * `R` - VulnerabilityRepository implementation
pub struct VulnerabilityAnnotator<R: VulnerabilityRepository> {
    vulnerability_repository: R,
    batch_timeout: Duration,
}

impl<R: VulnerabilityRepository> VulnerabilityAnnotator<R> {
    pub fn new(vulnerability_repository: R) -> Self {
        Self {
            vulnerability_repository,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
        }
    }

    pub fn with_batch_timeout(mut self, batch_timeout: Duration) -> Self {
        self.batch_timeout = batch_timeout;
        self
    }

    /// Returns every input package in input order, annotated where data was found
    ///
    /// The root and packages without an ecosystem are passed through untouched
    /// and never sent upstream.
    pub async fn annotate(&self, packages: Vec<Package>) -> Vec<Package> {
        let queryable: Vec<Package> = packages
            .iter()
            .filter(|p| !p.is_root() && p.ecosystem().is_some())
            .cloned()
            .collect();
        if queryable.is_empty() {
            return packages;
        }

        let results = match tokio::time::timeout(
            self.batch_timeout,
            self.vulnerability_repository.fetch_vulnerabilities(queryable),
        )
        .await
        {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                tracing::warn!(error = %format!("{:#}", e), "Vulnerability lookup failed; continuing without data");
                return packages;
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.batch_timeout.as_secs_f64(),
                    "Vulnerability lookup timed out; continuing without data"
                );
                return packages;
            }
        };

        let mut by_identity: HashMap<(String, String), Vec<Vulnerability>> = HashMap::new();
        for result in results {
            let key = (result.package_name().to_string(), result.version().to_string());
            by_identity
                .entry(key)
                .or_default()
                .extend(result.into_vulnerabilities());
        }
        let summaries: HashMap<(String, String), VulnerabilitySummary> = by_identity
            .into_iter()
            .filter_map(|(key, vulnerabilities)| {
                VulnerabilitySummary::from_vulnerabilities(vulnerabilities).map(|summary| (key, summary))
            })
            .collect();

        packages
            .into_iter()
            .map(|package| {
                if package.is_root() || package.ecosystem().is_none() {
                    return package;
                }
                let key = (package.name().to_string(), package.version().to_string());
                match summaries.get(&key) {
                    Some(summary) => package.annotated(summary.clone()),
                    None => package,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_network::domain::{Ecosystem, PackageVulnerabilities, Severity};
    use crate::shared::Result;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockVulnerabilityRepository {
        known: Vec<PackageVulnerabilities>,
        fail: bool,
        queried: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl VulnerabilityRepository for MockVulnerabilityRepository {
        async fn fetch_vulnerabilities(
            &self,
            packages: Vec<Package>,
        ) -> Result<Vec<PackageVulnerabilities>> {
            self.queried
                .lock()
                .unwrap()
                .extend(packages.iter().map(|p| p.name().to_string()));
            if self.fail {
                anyhow::bail!("OSV unavailable");
            }
            Ok(self.known.clone())
        }
    }

    fn pypi(name: &str, version: &str) -> Package {
        Package::with_ecosystem(name.to_string(), version.to_string(), Ecosystem::PyPI).unwrap()
    }

    fn advisory(package: &str, version: &str, id: &str, severity: Severity) -> PackageVulnerabilities {
        PackageVulnerabilities::new(
            package.to_string(),
            version.to_string(),
            vec![Vulnerability::new(id.to_string(), severity, 7.5, None, None).unwrap()],
        )
    }

    #[tokio::test]
    async fn test_annotates_matching_packages_in_order() {
        let repo = MockVulnerabilityRepository {
            known: vec![advisory("flask", "0.12", "GHSA-1", Severity::High)],
            ..Default::default()
        };
        let annotator = VulnerabilityAnnotator::new(repo);

        let result = annotator
            .annotate(vec![pypi("requests", "2.25.1"), pypi("flask", "0.12")])
            .await;

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name(), "requests");
        assert!(result[0].vulnerabilities().is_none());
        let summary = result[1].vulnerabilities().unwrap();
        assert_eq!(summary.overall_severity(), Severity::High);
        assert_eq!(summary.len(), 1);
    }

    #[tokio::test]
    async fn test_root_and_untagged_are_never_queried() {
        let repo = MockVulnerabilityRepository::default();
        let queried = Arc::clone(&repo.queried);
        let annotator = VulnerabilityAnnotator::new(repo);
        let untagged = Package::new("local".to_string(), "1.0".to_string()).unwrap();

        let result = annotator
            .annotate(vec![Package::root(), untagged, pypi("six", "1.16.0")])
            .await;

        assert_eq!(result.len(), 3);
        assert_eq!(*queried.lock().unwrap(), vec!["six".to_string()]);
    }

    #[tokio::test]
    async fn test_nothing_queryable_skips_upstream() {
        let repo = MockVulnerabilityRepository::default();
        let queried = Arc::clone(&repo.queried);
        let annotator = VulnerabilityAnnotator::new(repo);

        let result = annotator.annotate(vec![Package::root()]).await;

        assert_eq!(result.len(), 1);
        assert!(queried.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_fail_open() {
        let repo = MockVulnerabilityRepository {
            fail: true,
            ..Default::default()
        };
        let annotator = VulnerabilityAnnotator::new(repo);

        let result = annotator.annotate(vec![pypi("flask", "0.12")]).await;

        assert_eq!(result.len(), 1);
        assert!(result[0].vulnerabilities().is_none());
    }

    #[tokio::test]
    async fn test_empty_result_for_package_leaves_it_unannotated() {
        let repo = MockVulnerabilityRepository {
            known: vec![PackageVulnerabilities::new("flask".to_string(), "0.12".to_string(), vec![])],
            ..Default::default()
        };
        let annotator = VulnerabilityAnnotator::new(repo);

        let result = annotator.annotate(vec![pypi("flask", "0.12")]).await;

        assert!(result[0].vulnerabilities().is_none());
    }

    #[tokio::test]
    async fn test_repeated_identity_is_annotated_every_time() {
        let repo = MockVulnerabilityRepository {
            known: vec![advisory("flask", "0.12", "GHSA-1", Severity::High)],
            ..Default::default()
        };
        let annotator = VulnerabilityAnnotator::new(repo);

        let result = annotator
            .annotate(vec![pypi("flask", "0.12"), pypi("flask", "0.12")])
            .await;

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.vulnerabilities().is_some()));
    }
}
