//! Builder for constructing NetworkReadModel from domain objects

use super::network_read_model::{NetworkMetadataView, NetworkReadModel, NetworkSummaryView};
use super::package_view::{EdgeView, LevelView, PackageView, VulnerabilityView};
use crate::package_network::domain::{NetworkMetadata, Package, PackageNetwork};

/// Builder for constructing NetworkReadModel from domain objects
pub struct NetworkReadModelBuilder;

impl NetworkReadModelBuilder {
    /// Builds the read model for a network and its build metadata
    pub fn build(network: &PackageNetwork, metadata: &NetworkMetadata) -> NetworkReadModel {
        let levels: Vec<LevelView> = network
            .levels()
            .iter()
            .enumerate()
            .map(|(index, level)| LevelView {
                index,
                packages: level.packages().iter().map(Self::build_package).collect(),
                edges: level
                    .dependencies()
                    .iter()
                    .map(|edge| EdgeView {
                        from: edge.from().to_string(),
                        to: edge.to().to_string(),
                    })
                    .collect(),
            })
            .collect();

        let vulnerabilities = Self::build_vulnerabilities(network);

        NetworkReadModel {
            metadata: NetworkMetadataView {
                timestamp: metadata.timestamp().to_string(),
                tool_name: metadata.tool_name().to_string(),
                tool_version: metadata.tool_version().to_string(),
                build_id: metadata.build_id().to_string(),
                max_levels: metadata.max_levels(),
            },
            summary: NetworkSummaryView {
                level_count: network.level_count(),
                package_count: network.total_package_count(),
                dependency_count: network.total_dependency_count(),
                vulnerable_package_count: network.vulnerable_packages().len(),
                vulnerability_count: vulnerabilities.len(),
                max_severity: network.max_severity(),
            },
            levels,
            vulnerabilities,
        }
    }

    fn build_package(package: &Package) -> PackageView {
        PackageView {
            id: package.to_string(),
            name: package.name().to_string(),
            version: package.version().to_string(),
            ecosystem: package.ecosystem().map(|e| e.as_str().to_string()),
            is_root: package.is_root(),
            severity: package.vulnerabilities().map(|s| s.overall_severity()),
            vulnerability_count: package.vulnerabilities().map_or(0, |s| s.len()),
        }
    }

    /// Flattens every package's vulnerabilities, most severe first
    ///
    /// Ties keep level order, then the order the database reported.
    fn build_vulnerabilities(network: &PackageNetwork) -> Vec<VulnerabilityView> {
        let mut views: Vec<VulnerabilityView> = network
            .levels()
            .iter()
            .enumerate()
            .flat_map(|(level, l)| l.packages().iter().map(move |p| (level, p)))
            .filter_map(|(level, package)| Some((level, package, package.vulnerabilities()?)))
            .flat_map(|(level, package, summary)| {
                summary.vulnerabilities().iter().map(move |vuln| VulnerabilityView {
                    package_id: package.to_string(),
                    package_name: package.name().to_string(),
                    package_version: package.version().to_string(),
                    level,
                    id: vuln.name().to_string(),
                    external_id: vuln.external_id().map(str::to_string),
                    severity: vuln.severity(),
                    score: vuln.score(),
                    fixed_version: vuln.fixed_version().map(str::to_string),
                })
            })
            .collect();

        views.sort_by(|a, b| b.severity.cmp(&a.severity));
        views
    }
}
