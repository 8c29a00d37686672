//! package-network - leveled dependency networks for project manifests
//!
//! This library reads a manifest (`requirements*.txt`, `Pipfile` or
//! `package.json`), resolves its dependencies level by level against the
//! package registries, and annotates every package with known
//! vulnerabilities from OSV. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`package_network`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use package_network::prelude::*;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let manifest_reader = FileSystemReader::new();
//! let manifest_parser = ManifestParserRegistry::new();
//! let resolver = ResolverFactory::create(Duration::from_secs(10), 10)?;
//! let annotator = VulnerabilityAnnotator::new(OsvClient::new(Duration::from_secs(10))?);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildNetworkUseCase::new(
//!     manifest_reader,
//!     manifest_parser,
//!     resolver,
//!     Some(annotator),
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = NetworkRequest::new(PathBuf::from("requirements.txt")).with_max_levels(3);
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&response.network, &response.metadata)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod package_network;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::manifest::ManifestParserRegistry;
    pub use crate::adapters::outbound::network::{
        CachingDependencyRepository, NpmDependencyRepository, OsvClient, PyPiDependencyRepository,
    };
    pub use crate::application::dto::{NetworkRequest, NetworkResponse, OutputFormat};
    pub use crate::application::factories::ResolverFactory;
    pub use crate::application::use_cases::{
        BuildNetworkUseCase, DependencyResolver, VulnerabilityAnnotator,
    };
    pub use crate::package_network::domain::{
        Dependency, Ecosystem, Manifest, NetworkLevel, NetworkMetadata, Package, PackageNetwork,
        Severity,
    };
    pub use crate::ports::inbound::NetworkBuildPort;
    pub use crate::ports::outbound::{
        DependencyRepository, ManifestParser, ManifestReader, NetworkFormatter, OutputPresenter,
        ProgressReporter, RequiredPackage, VulnerabilityRepository,
    };
    pub use crate::shared::Result;
}
