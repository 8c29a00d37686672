use crate::package_network::domain::Manifest;
use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for loading a dependency manifest
///
/// This port abstracts the file system operations needed to read
/// a manifest such as `requirements.txt` or `package.json`.
pub trait ManifestReader {
    /// Reads the manifest at the given path
    ///
    /// # Returns
    /// The manifest's file name and raw content
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The path is a symlink or not a regular file
    /// - The file cannot be read due to permissions or I/O errors
    fn read_manifest(&self, path: &Path) -> Result<Manifest>;
}
