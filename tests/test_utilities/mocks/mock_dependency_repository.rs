use async_trait::async_trait;
use package_network::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock DependencyRepository backed by an in-memory dependency table
///
/// Lookups are keyed by package name; unknown packages have no dependencies.
pub struct MockDependencyRepository {
    pub ecosystem: Ecosystem,
    pub graph: HashMap<String, Vec<RequiredPackage>>,
    pub failing: HashSet<String>,
    pub calls: Arc<AtomicUsize>,
}

impl MockDependencyRepository {
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            graph: HashMap::new(),
            failing: HashSet::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_dependencies(mut self, package: &str, dependencies: &[(&str, &str)]) -> Self {
        self.graph.insert(
            package.to_string(),
            dependencies
                .iter()
                .map(|(name, version)| RequiredPackage::new(*name, *version))
                .collect(),
        );
        self
    }

    pub fn with_failure_for(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DependencyRepository for MockDependencyRepository {
    fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    async fn fetch_direct_dependencies(&self, package: &Package) -> Result<Vec<RequiredPackage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(package.name()) {
            anyhow::bail!("Mock registry failure for {}", package.name());
        }
        Ok(self.graph.get(package.name()).cloned().unwrap_or_default())
    }
}
