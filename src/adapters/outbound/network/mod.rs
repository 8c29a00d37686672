/// Network adapters for registry and vulnerability database calls
mod caching_dependency_repository;
mod npm_client;
mod osv_client;
mod pypi_client;

pub use caching_dependency_repository::CachingDependencyRepository;
pub use npm_client::NpmDependencyRepository;
pub use osv_client::OsvClient;
pub use pypi_client::PyPiDependencyRepository;
