use crate::application::read_models::NetworkReadModelBuilder;
use crate::package_network::domain::{NetworkMetadata, PackageNetwork};
use crate::ports::outbound::NetworkFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for machine-readable network output
///
/// Serializes the network read model as pretty-printed JSON: metadata,
/// summary totals, levels with their packages and edges, then the
/// flattened vulnerability list.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkFormatter for JsonFormatter {
    fn format(&self, network: &PackageNetwork, metadata: &NetworkMetadata) -> Result<String> {
        let model = NetworkReadModelBuilder::build(network, metadata);
        let json = serde_json::to_string_pretty(&model)
            .map_err(|e| anyhow::anyhow!("Failed to serialize network to JSON: {}", e))?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_network::domain::{
        Dependency, Ecosystem, NetworkLevel, Package, Severity, Vulnerability,
        VulnerabilitySummary,
    };
    use serde_json::Value;

    fn metadata() -> NetworkMetadata {
        NetworkMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "package-network".to_string(),
            "0.1.0".to_string(),
            "urn:uuid:test-123".to_string(),
            3,
        )
    }

    #[test]
    fn test_format_root_only_network() {
        let network = PackageNetwork::new(vec![NetworkLevel::new(vec![Package::root()], vec![])]);

        let json = JsonFormatter::new().format(&network, &metadata()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["build_id"], "urn:uuid:test-123");
        assert_eq!(value["summary"]["level_count"], 1);
        assert_eq!(value["summary"]["package_count"], 0);
        assert_eq!(value["levels"][0]["packages"][0]["is_root"], true);
        assert_eq!(value["levels"][0]["edges"], Value::Array(vec![]));
        assert!(value["summary"].get("max_severity").is_none());
    }

    #[test]
    fn test_format_with_vulnerabilities() {
        let root = Package::root();
        let cve = Vulnerability::new(
            "GHSA-j8r2-6x86-q33q".to_string(),
            Severity::Medium,
            6.1,
            Some("CVE-2023-32681".to_string()),
            Some("2.31.0".to_string()),
        )
        .unwrap();
        let requests =
            Package::with_ecosystem("requests".to_string(), "2.25.1".to_string(), Ecosystem::PyPI)
                .unwrap()
                .annotated(VulnerabilitySummary::from_vulnerabilities(vec![cve]).unwrap());
        let network = PackageNetwork::new(vec![NetworkLevel::new(
            vec![root.clone(), requests.clone()],
            vec![Dependency::new(root, requests).unwrap()],
        )]);

        let json = JsonFormatter::new().format(&network, &metadata()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let package = &value["levels"][0]["packages"][1];
        assert_eq!(package["id"], "requests@2.25.1");
        assert_eq!(package["ecosystem"], "PyPI");
        assert_eq!(package["severity"], "Medium");
        assert_eq!(value["levels"][0]["edges"][0]["to"], "requests@2.25.1");
        assert_eq!(value["vulnerabilities"][0]["external_id"], "CVE-2023-32681");
        assert_eq!(value["summary"]["max_severity"], "Medium");
    }
}
