use crate::package_network::domain::{Ecosystem, Package};
use crate::ports::outbound::{DependencyRepository, RequiredPackage};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for direct dependency lookups
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    package_name: String,
    version: String,
}

impl CacheKey {
    fn new(package_name: &str, version: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            version: version.to_string(),
        }
    }
}

/// CachingDependencyRepository wraps a DependencyRepository and adds in-memory caching.
///
/// This adapter implements the decorator pattern to add caching capability
/// to any DependencyRepository implementation. The cache is thread-safe and
/// may be shared by concurrent lookups and by successive builds.
///
/// Only successful responses are cached, so a failed lookup is retried the
/// next time the same package is asked for.
pub struct CachingDependencyRepository<R: DependencyRepository> {
    inner: R,
    cache: Arc<DashMap<CacheKey, Vec<RequiredPackage>>>,
}

impl<R: DependencyRepository> CachingDependencyRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: DependencyRepository> DependencyRepository for CachingDependencyRepository<R> {
    fn ecosystem(&self) -> Ecosystem {
        self.inner.ecosystem()
    }

    async fn fetch_direct_dependencies(&self, package: &Package) -> Result<Vec<RequiredPackage>> {
        let key = CacheKey::new(package.name(), package.version());

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(package = %package, "Dependency cache hit");
            return Ok(cached.clone());
        }

        let required = self.inner.fetch_direct_dependencies(package).await?;
        self.cache.insert(key, required.clone());

        Ok(required)
    }
}
