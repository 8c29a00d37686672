use crate::adapters::outbound::network::{
    CachingDependencyRepository, NpmDependencyRepository, PyPiDependencyRepository,
};
use crate::application::use_cases::DependencyResolver;
use crate::shared::Result;
use std::sync::Arc;
use std::time::Duration;

/// Factory for the startup registry of dependency repositories
///
/// Every supported ecosystem gets its registry client wrapped in a response
/// cache. Adding an ecosystem means registering one more repository here.
pub struct ResolverFactory;

impl ResolverFactory {
    /// Creates a resolver for PyPI and npm
    ///
    /// # Arguments
    /// * `request_timeout` - Bound on each registry lookup
    /// * `max_concurrent` - Number of lookups in flight at once
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be constructed
    pub fn create(request_timeout: Duration, max_concurrent: usize) -> Result<DependencyResolver> {
        let pypi = CachingDependencyRepository::new(PyPiDependencyRepository::new(request_timeout)?);
        let npm = CachingDependencyRepository::new(NpmDependencyRepository::new(request_timeout)?);

        Ok(DependencyResolver::new()
            .with_repository(Arc::new(pypi))
            .with_repository(Arc::new(npm))
            .with_request_timeout(request_timeout)
            .with_max_concurrent(max_concurrent))
    }
}
