/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, registries, console, etc.).
pub mod dependency_repository;
pub mod formatter;
pub mod manifest_parser;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod vulnerability_repository;

pub use dependency_repository::{DependencyRepository, RequiredPackage};
pub use formatter::NetworkFormatter;
pub use manifest_parser::ManifestParser;
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use vulnerability_repository::VulnerabilityRepository;
