pub mod identity_registry;
pub mod metadata_generator;
pub mod requirement;
pub mod semver;

pub use identity_registry::{ClaimedPackages, SeenDependencies};
pub use metadata_generator::MetadataGenerator;
pub use requirement::{pinned_version, Requirement};
pub use semver::exact_semver;
