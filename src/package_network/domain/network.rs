use super::{Dependency, Package, PackageKey, Severity};
use crate::shared::Result;
use std::collections::{HashMap, HashSet};

/// One breadth-first tier of the network
#[derive(Debug, Clone)]
pub struct NetworkLevel {
    packages: Vec<Package>,
    dependencies: Vec<Dependency>,
}

impl NetworkLevel {
    pub fn new(packages: Vec<Package>, dependencies: Vec<Dependency>) -> Self {
        Self {
            packages,
            dependencies,
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Packages of this level other than the synthetic root
    pub fn non_root_packages(&self) -> Vec<Package> {
        self.packages
            .iter()
            .filter(|p| !p.is_root())
            .cloned()
            .collect()
    }
}

/// PackageNetwork aggregate: the ordered levels produced by one build
#[derive(Debug, Clone)]
pub struct PackageNetwork {
    levels: Vec<NetworkLevel>,
}

impl PackageNetwork {
    pub fn new(levels: Vec<NetworkLevel>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[NetworkLevel] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn root(&self) -> Option<&Package> {
        self.levels.first()?.packages().first().filter(|p| p.is_root())
    }

    /// Number of packages excluding the root
    pub fn total_package_count(&self) -> usize {
        self.packages().filter(|p| !p.is_root()).count()
    }

    pub fn total_dependency_count(&self) -> usize {
        self.levels.iter().map(|l| l.dependencies().len()).sum()
    }

    /// All packages in level order
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.levels.iter().flat_map(|l| l.packages().iter())
    }

    /// Index of the level that claimed the given identity
    pub fn level_of(&self, key: &PackageKey) -> Option<usize> {
        self.levels
            .iter()
            .position(|l| l.packages().iter().any(|p| &p.key() == key))
    }

    /// Packages carrying a vulnerability summary, in level order
    pub fn vulnerable_packages(&self) -> Vec<&Package> {
        self.packages()
            .filter(|p| p.vulnerabilities().is_some())
            .collect()
    }

    /// Highest overall severity in the network, if any package is vulnerable
    pub fn max_severity(&self) -> Option<Severity> {
        self.packages()
            .filter_map(|p| p.vulnerabilities())
            .map(|s| s.overall_severity())
            .max()
    }

    /// Checks the structural invariants of a network
    ///
    /// # Errors
    /// Returns an error naming the first violation found:
    /// - level 0 missing or not starting with the root
    /// - a root package anywhere but level 0 index 0
    /// - an identity claimed by more than one level
    /// - an edge whose target is not in its own level
    /// - an edge whose source is not in the previous level (root for level 0)
    /// - a self-loop
    pub fn validate(&self) -> Result<()> {
        let first = self
            .levels
            .first()
            .ok_or_else(|| anyhow::anyhow!("Network has no levels"))?;
        if !first.packages().first().is_some_and(|p| p.is_root()) {
            anyhow::bail!("Level 0 must start with the root package");
        }

        let mut claimed_by: HashMap<PackageKey, usize> = HashMap::new();
        for (index, level) in self.levels.iter().enumerate() {
            for (position, package) in level.packages().iter().enumerate() {
                if package.is_root() && (index, position) != (0, 0) {
                    anyhow::bail!("Root package found outside level 0 index 0");
                }
                if let Some(previous) = claimed_by.insert(package.key(), index) {
                    anyhow::bail!(
                        "Package {} appears in levels {} and {}",
                        package,
                        previous,
                        index
                    );
                }
            }
        }

        let mut previous_keys: HashSet<PackageKey> = HashSet::new();
        for (index, level) in self.levels.iter().enumerate() {
            let own_keys: HashSet<PackageKey> = level.packages().iter().map(|p| p.key()).collect();
            for edge in level.dependencies() {
                if edge.from().key() == edge.to().key() {
                    anyhow::bail!("Self-loop on {} in level {}", edge.from(), index);
                }
                if !own_keys.contains(&edge.to().key()) {
                    anyhow::bail!("Edge {} in level {} targets a package of another level", edge, index);
                }
                let source_ok = if index == 0 {
                    edge.from().is_root()
                } else {
                    previous_keys.contains(&edge.from().key())
                };
                if !source_ok {
                    anyhow::bail!("Edge {} in level {} has a source outside the previous level", edge, index);
                }
            }
            previous_keys = own_keys;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_network::domain::{Vulnerability, VulnerabilitySummary};

    fn pkg(name: &str, version: &str) -> Package {
        Package::new(name.to_string(), version.to_string()).unwrap()
    }

    fn edge(from: &Package, to: &Package) -> Dependency {
        Dependency::new(from.clone(), to.clone()).unwrap()
    }

    fn two_level_network() -> PackageNetwork {
        let root = Package::root();
        let requests = pkg("requests", "2.25.1");
        let idna = pkg("idna", "2.10");
        PackageNetwork::new(vec![
            NetworkLevel::new(
                vec![root.clone(), requests.clone()],
                vec![edge(&root, &requests)],
            ),
            NetworkLevel::new(vec![idna.clone()], vec![edge(&requests, &idna)]),
        ])
    }

    #[test]
    fn test_valid_network() {
        let network = two_level_network();
        assert!(network.validate().is_ok());
        assert_eq!(network.level_count(), 2);
        assert_eq!(network.total_package_count(), 2);
        assert_eq!(network.total_dependency_count(), 2);
        assert!(network.root().unwrap().is_root());
        assert_eq!(network.level_of(&pkg("idna", "2.10").key()), Some(1));
        assert_eq!(network.level_of(&pkg("flask", "1.0").key()), None);
    }

    #[test]
    fn test_root_only_network() {
        let network = PackageNetwork::new(vec![NetworkLevel::new(vec![Package::root()], vec![])]);
        assert!(network.validate().is_ok());
        assert_eq!(network.total_package_count(), 0);
        assert!(network.max_severity().is_none());
    }

    #[test]
    fn test_empty_network_is_invalid() {
        assert!(PackageNetwork::new(vec![]).validate().is_err());
    }

    #[test]
    fn test_missing_root_is_invalid() {
        let network = PackageNetwork::new(vec![NetworkLevel::new(vec![pkg("a", "1")], vec![])]);
        assert!(network.validate().is_err());
    }

    #[test]
    fn test_duplicate_identity_across_levels_is_invalid() {
        let root = Package::root();
        let a = pkg("a", "1");
        let network = PackageNetwork::new(vec![
            NetworkLevel::new(vec![root.clone(), a.clone()], vec![edge(&root, &a)]),
            NetworkLevel::new(vec![a.clone()], vec![]),
        ]);
        let err = network.validate().unwrap_err().to_string();
        assert!(err.contains("appears in levels 0 and 1"));
    }

    #[test]
    fn test_edge_to_other_level_is_invalid() {
        let root = Package::root();
        let a = pkg("a", "1");
        let b = pkg("b", "1");
        let network = PackageNetwork::new(vec![
            NetworkLevel::new(vec![root.clone(), a.clone(), b.clone()], vec![edge(&root, &a)]),
            NetworkLevel::new(vec![pkg("c", "1")], vec![edge(&a, &b)]),
        ]);
        assert!(network.validate().is_err());
    }

    #[test]
    fn test_edge_from_non_previous_level_is_invalid() {
        let root = Package::root();
        let a = pkg("a", "1");
        let b = pkg("b", "1");
        let c = pkg("c", "1");
        let network = PackageNetwork::new(vec![
            NetworkLevel::new(vec![root.clone(), a.clone()], vec![edge(&root, &a)]),
            NetworkLevel::new(vec![b.clone()], vec![edge(&a, &b)]),
            NetworkLevel::new(vec![c.clone()], vec![edge(&a, &c)]),
        ]);
        assert!(network.validate().is_err());
    }

    #[test]
    fn test_vulnerable_packages_and_max_severity() {
        let root = Package::root();
        let vuln = Vulnerability::new("GHSA-1".to_string(), Severity::Medium, 5.0, None, None)
            .unwrap();
        let flask = pkg("flask", "0.12")
            .annotated(VulnerabilitySummary::from_vulnerabilities(vec![vuln]).unwrap());
        let network = PackageNetwork::new(vec![NetworkLevel::new(
            vec![root.clone(), flask.clone(), pkg("six", "1.0")],
            vec![edge(&root, &flask)],
        )]);

        assert_eq!(network.vulnerable_packages().len(), 1);
        assert_eq!(network.max_severity(), Some(Severity::Medium));
    }

    #[test]
    fn test_non_root_packages() {
        let network = two_level_network();
        let level0 = network.levels()[0].non_root_packages();
        assert_eq!(level0.len(), 1);
        assert_eq!(level0[0].name(), "requests");
    }
}
