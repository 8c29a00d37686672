use crate::package_network::domain::{Manifest, Package};
use crate::shared::Result;

/// ManifestParser port turning a raw manifest into declared packages
pub trait ManifestParser {
    /// Parses the manifest into an ordered list of packages
    ///
    /// Each package carries the ecosystem of the manifest format.
    /// Duplicates are returned as declared; deduplication is the builder's job.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No supported format matches the file name
    /// - The content is malformed for its format
    fn parse(&self, manifest: &Manifest) -> Result<Vec<Package>>;
}
