//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of a built network for formatters.

pub mod network_read_model;
pub mod network_read_model_builder;
pub mod package_view;

pub use network_read_model::{NetworkMetadataView, NetworkReadModel, NetworkSummaryView};
pub use network_read_model_builder::NetworkReadModelBuilder;
pub use package_view::{EdgeView, LevelView, PackageView, VulnerabilityView};
