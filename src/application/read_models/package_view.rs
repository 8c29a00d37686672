//! Package, edge and vulnerability view structs for the read model
//!
//! These structs provide a flattened, query-optimized view of network data.

use crate::package_network::domain::Severity;
use serde::Serialize;

/// View representation of one package
#[derive(Debug, Clone, Serialize)]
pub struct PackageView {
    /// Identity string, `name@version`
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
    pub is_root: bool,
    /// Overall severity when the package has known vulnerabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub vulnerability_count: usize,
}

/// View representation of a dependency edge, by endpoint ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
}

/// View representation of one network level
#[derive(Debug, Clone, Serialize)]
pub struct LevelView {
    pub index: usize,
    pub packages: Vec<PackageView>,
    pub edges: Vec<EdgeView>,
}

/// View representation of a single vulnerability affecting a package
#[derive(Debug, Clone, Serialize)]
pub struct VulnerabilityView {
    /// Id of the affected package, `name@version`
    pub package_id: String,
    pub package_name: String,
    pub package_version: String,
    /// Level that holds the affected package
    pub level: usize,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub severity: Severity,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
}
