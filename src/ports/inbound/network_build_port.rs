use crate::package_network::domain::{Manifest, PackageNetwork};
use crate::shared::Result;
use async_trait::async_trait;

/// NetworkBuildPort - Inbound port for building a package network
///
/// Takes an already loaded manifest and produces the level-by-level
/// network of everything it transitively requires.
#[async_trait]
pub trait NetworkBuildPort: Send + Sync {
    /// Builds the network for `manifest`
    ///
    /// # Arguments
    /// * `manifest` - Manifest file name and content
    /// * `max_levels` - Cap on the number of levels; 0 and 1 both yield level 0 only
    ///
    /// # Errors
    /// Returns a `NetworkCreationFailed` error naming the failing stage if:
    /// - The manifest cannot be parsed or its format is unsupported
    /// - A package has no ecosystem or its ecosystem has no resolver
    /// - The finished network violates a structural invariant
    async fn build_network(&self, manifest: &Manifest, max_levels: usize) -> Result<PackageNetwork>;
}
