use super::{PackageJsonFormat, PipfileFormat, RequirementsTxtFormat};
use crate::package_network::domain::{Ecosystem, Manifest, Package};
use crate::ports::outbound::ManifestParser;
use crate::shared::error::NetworkError;
use crate::shared::Result;

/// One concrete manifest format
///
/// Implementations report format problems as plain errors; the registry
/// wraps them into `NetworkError::FileProcessing`.
pub trait ManifestFormat: Send + Sync {
    /// Whether this format handles files with the given name
    fn supports_file(&self, file_name: &str) -> bool;

    /// Ecosystem every package of this format belongs to
    fn ecosystem(&self) -> Ecosystem;

    /// Extracts declared packages in file order
    fn parse_content(&self, content: &str) -> Result<Vec<Package>>;
}

/// ManifestParserRegistry picks the first registered format matching a file name
///
/// Implements the ManifestParser port.
pub struct ManifestParserRegistry {
    formats: Vec<Box<dyn ManifestFormat>>,
}

impl ManifestParserRegistry {
    /// Creates a registry with every built-in format
    pub fn new() -> Self {
        Self {
            formats: vec![
                Box::new(RequirementsTxtFormat::new()),
                Box::new(PipfileFormat::new()),
                Box::new(PackageJsonFormat::new()),
            ],
        }
    }

    /// Creates a registry with no formats
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    pub fn with_format(mut self, format: Box<dyn ManifestFormat>) -> Self {
        self.formats.push(format);
        self
    }

    fn find_format(&self, file_name: &str) -> Option<&dyn ManifestFormat> {
        self.formats
            .iter()
            .find(|format| format.supports_file(file_name))
            .map(|format| format.as_ref())
    }
}

impl Default for ManifestParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for ManifestParserRegistry {
    fn parse(&self, manifest: &Manifest) -> Result<Vec<Package>> {
        let format =
            self.find_format(manifest.file_name())
                .ok_or_else(|| NetworkError::UnsupportedFormat {
                    file_name: manifest.file_name().to_string(),
                })?;

        let packages = format
            .parse_content(manifest.content())
            .map_err(|e| NetworkError::FileProcessing {
                file_name: manifest.file_name().to_string(),
                details: format!("{:#}", e),
            })?;

        tracing::debug!(
            file = manifest.file_name(),
            ecosystem = %format.ecosystem(),
            count = packages.len(),
            "Parsed manifest"
        );
        Ok(packages)
    }
}
