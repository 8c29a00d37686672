/// Use cases module containing application business logic orchestration
mod annotate_vulnerabilities;
mod build_network;
mod resolve_dependencies;

pub use annotate_vulnerabilities::{VulnerabilityAnnotator, DEFAULT_BATCH_TIMEOUT};
pub use build_network::BuildNetworkUseCase;
pub use resolve_dependencies::{DependencyResolver, DEFAULT_MAX_CONCURRENT, DEFAULT_REQUEST_TIMEOUT};
