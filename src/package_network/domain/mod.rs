pub mod dependency;
pub mod ecosystem;
pub mod manifest;
pub mod network;
pub mod network_metadata;
pub mod package;
pub mod vulnerability;

pub use dependency::{Dependency, DependencyKey};
pub use ecosystem::Ecosystem;
pub use manifest::Manifest;
pub use network::{NetworkLevel, PackageNetwork};
pub use network_metadata::NetworkMetadata;
pub use package::{Package, PackageKey, PackageName, Version, LATEST_VERSION, ROOT_PACKAGE_NAME};
pub use vulnerability::{
    CvssScore, PackageVulnerabilities, Severity, Vulnerability, VulnerabilitySummary,
};
