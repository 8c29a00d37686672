use crate::package_network::domain::{Dependency, Ecosystem, Package};
use crate::ports::outbound::{DependencyRepository, ProgressReporter, RequiredPackage};
use crate::shared::error::NetworkError;
use crate::shared::Result;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a single registry lookup
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of lookups in flight at once
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// DependencyResolver - resolves the direct dependencies of a batch of packages
///
/// Lookups are dispatched by ecosystem tag to the registered
/// [`DependencyRepository`] and run concurrently with a bounded fan-out.
/// A lookup that fails or times out is logged and contributes no edges.
pub struct DependencyResolver {
    repositories: HashMap<Ecosystem, Arc<dyn DependencyRepository>>,
    request_timeout: Duration,
    max_concurrent: usize,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self {
            repositories: HashMap::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Registers a repository for the ecosystem it reports, replacing any previous one
    pub fn with_repository(mut self, repository: Arc<dyn DependencyRepository>) -> Self {
        self.repositories.insert(repository.ecosystem(), repository);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn supports(&self, ecosystem: Ecosystem) -> bool {
        self.repositories.contains_key(&ecosystem)
    }

    /// Resolves the direct dependencies of every package in the batch
    ///
    /// # Errors
    /// Fails before issuing any request if a package has no ecosystem tag or
    /// its ecosystem has no registered repository.
    pub async fn resolve_direct_dependencies(&self, packages: &[Package]) -> Result<Vec<Dependency>> {
        self.resolve_with_progress(packages, None).await
    }

    /// Same as [`Self::resolve_direct_dependencies`], reporting per-lookup progress
    pub async fn resolve_with_progress(
        &self,
        packages: &[Package],
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<Vec<Dependency>> {
        let dispatch = self.dispatch(packages)?;
        let total = dispatch.len();

        let mut pending = dispatch.into_iter().enumerate();
        let mut in_flight = FuturesUnordered::new();
        for (index, (package, repository)) in pending.by_ref().take(self.max_concurrent) {
            in_flight.push(self.start_lookup(index, package, repository));
        }

        let mut results: Vec<(usize, Vec<Dependency>)> = Vec::with_capacity(total);
        while let Some((index, edges)) = in_flight.next().await {
            results.push((index, edges));
            if let Some(reporter) = progress {
                reporter.report_progress(results.len(), total, Some("Resolving dependencies"));
            }
            if let Some((index, (package, repository))) = pending.next() {
                in_flight.push(self.start_lookup(index, package, repository));
            }
        }

        // Completion order is arbitrary; restore input order for stable output
        results.sort_by_key(|(index, _)| *index);
        Ok(results.into_iter().flat_map(|(_, edges)| edges).collect())
    }

    /// Pairs every package with its repository, failing on the first gap
    fn dispatch<'a>(
        &self,
        packages: &'a [Package],
    ) -> Result<Vec<(&'a Package, Arc<dyn DependencyRepository>)>> {
        packages
            .iter()
            .map(|package| {
                let ecosystem = package.ecosystem().ok_or_else(|| NetworkError::UnknownEcosystem {
                    package: package.to_string(),
                })?;
                let repository = self.repositories.get(&ecosystem).ok_or_else(|| {
                    NetworkError::NoResolverRegistered {
                        ecosystem: ecosystem.to_string(),
                    }
                })?;
                Ok((package, Arc::clone(repository)))
            })
            .collect()
    }

    fn start_lookup<'a>(
        &'a self,
        index: usize,
        package: &'a Package,
        repository: Arc<dyn DependencyRepository>,
    ) -> BoxFuture<'a, (usize, Vec<Dependency>)> {
        async move { (index, self.lookup(package, repository.as_ref()).await) }.boxed()
    }

    async fn lookup(&self, package: &Package, repository: &dyn DependencyRepository) -> Vec<Dependency> {
        let required = match tokio::time::timeout(
            self.request_timeout,
            repository.fetch_direct_dependencies(package),
        )
        .await
        {
            Ok(Ok(required)) => required,
            Ok(Err(e)) => {
                tracing::warn!(package = %package, error = %format!("{:#}", e), "Dependency lookup failed");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!(
                    package = %package,
                    timeout_secs = self.request_timeout.as_secs_f64(),
                    "Dependency lookup timed out"
                );
                return Vec::new();
            }
        };

        required
            .into_iter()
            .filter_map(|child| Self::edge_to(package, child))
            .collect()
    }

    /// Builds the edge `parent -> child`; children inherit the parent's ecosystem
    fn edge_to(parent: &Package, child: RequiredPackage) -> Option<Dependency> {
        let ecosystem = parent.ecosystem()?;
        let target = match Package::with_ecosystem(child.name.clone(), child.version.clone(), ecosystem) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(
                    package = %parent,
                    dependency = %child.name,
                    error = %e,
                    "Skipping invalid dependency"
                );
                return None;
            }
        };
        match Dependency::new(parent.clone(), target) {
            Ok(edge) => Some(edge),
            Err(e) => {
                tracing::warn!(package = %parent, error = %e, "Skipping self-referencing dependency");
                None
            }
        }
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}
