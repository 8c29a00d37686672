use crate::package_network::domain::{NetworkMetadata, PackageNetwork, Severity};

/// NetworkResponse - Internal response DTO from the network build use case
///
/// Carries the immutable network snapshot together with the metadata
/// formatters need.
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub network: PackageNetwork,
    pub metadata: NetworkMetadata,
}

impl NetworkResponse {
    pub fn new(network: PackageNetwork, metadata: NetworkMetadata) -> Self {
        Self { network, metadata }
    }

    /// Whether any package's overall severity reaches the threshold
    pub fn has_vulnerabilities_at_or_above(&self, threshold: Severity) -> bool {
        self.network
            .max_severity()
            .is_some_and(|severity| severity >= threshold)
    }
}
