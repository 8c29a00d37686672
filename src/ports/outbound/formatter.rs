use crate::package_network::domain::{NetworkMetadata, PackageNetwork};
use crate::shared::Result;

/// NetworkFormatter port for rendering a built network
///
/// This port abstracts the output representation (JSON, Markdown, etc.).
pub trait NetworkFormatter {
    /// Formats the network together with its build metadata
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, network: &PackageNetwork, metadata: &NetworkMetadata) -> Result<String>;
}
