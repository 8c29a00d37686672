use crate::package_network::domain::NetworkMetadata;
use chrono::Utc;
use uuid::Uuid;

/// MetadataGenerator service for describing a network build
pub struct MetadataGenerator;

impl MetadataGenerator {
    /// Generates metadata with current timestamp and a unique build id
    pub fn generate_metadata(tool_name: &str, tool_version: &str, max_levels: usize) -> NetworkMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let build_id = format!("urn:uuid:{}", Uuid::new_v4());

        NetworkMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            build_id,
            max_levels,
        )
    }

    /// Generates metadata naming this tool, with the compile-time version
    pub fn generate_default_metadata(max_levels: usize) -> NetworkMetadata {
        Self::generate_metadata("package-network", env!("CARGO_PKG_VERSION"), max_levels)
    }
}
