//! Network read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! all network data in a query-optimized format.

use super::package_view::{LevelView, VulnerabilityView};
use crate::package_network::domain::Severity;
use serde::Serialize;

/// Main read model for a built network
///
/// This struct provides a denormalized, query-optimized view of network data
/// following the CQRS-lite pattern.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReadModel {
    pub metadata: NetworkMetadataView,
    pub summary: NetworkSummaryView,
    pub levels: Vec<LevelView>,
    /// Every vulnerability in the network, most severe first
    pub vulnerabilities: Vec<VulnerabilityView>,
}

/// View representation of build metadata
#[derive(Debug, Clone, Serialize)]
pub struct NetworkMetadataView {
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub build_id: String,
    pub max_levels: usize,
}

/// Totals across the whole network
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummaryView {
    pub level_count: usize,
    /// Packages excluding the root
    pub package_count: usize,
    pub dependency_count: usize,
    pub vulnerable_package_count: usize,
    pub vulnerability_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_severity: Option<Severity>,
}
