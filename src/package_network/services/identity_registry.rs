use crate::package_network::domain::{Dependency, DependencyKey, Package, PackageKey};
use std::collections::HashSet;

/// Package identities already placed in some level of the network being built
///
/// The first level to claim an identity keeps it; later claims are dropped.
/// One instance lives for exactly one build.
#[derive(Debug, Default)]
pub struct ClaimedPackages {
    keys: HashSet<PackageKey>,
}

impl ClaimedPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims every first-seen identity and returns those packages in input order
    ///
    /// Duplicates within `packages` and identities claimed earlier are dropped.
    pub fn claim_new(&mut self, packages: Vec<Package>) -> Vec<Package> {
        packages
            .into_iter()
            .filter(|package| self.keys.insert(package.key()))
            .collect()
    }

    pub fn contains(&self, key: &PackageKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Edge identities already processed during the build
#[derive(Debug, Default)]
pub struct SeenDependencies {
    keys: HashSet<DependencyKey>,
}

impl SeenDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the given edges as seen without filtering them
    pub fn mark_seen<'a>(&mut self, dependencies: impl IntoIterator<Item = &'a Dependency>) {
        self.keys
            .extend(dependencies.into_iter().map(|dependency| dependency.key()));
    }

    /// Keeps only edges never seen before, recording the survivors
    pub fn retain_unseen(&mut self, dependencies: Vec<Dependency>) -> Vec<Dependency> {
        dependencies
            .into_iter()
            .filter(|dependency| self.keys.insert(dependency.key()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> Package {
        Package::new(name.to_string(), version.to_string()).unwrap()
    }

    #[test]
    fn test_claim_new_drops_duplicates_and_keeps_order() {
        let mut claimed = ClaimedPackages::new();
        let first = claimed.claim_new(vec![
            pkg("requests", "2.25.1"),
            pkg("flask", "1.1.2"),
            pkg("requests", "2.25.1"),
        ]);

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name(), "requests");
        assert_eq!(first[1].name(), "flask");
        assert_eq!(claimed.len(), 2);
    }

    #[test]
    fn test_claim_new_drops_previously_claimed() {
        let mut claimed = ClaimedPackages::new();
        claimed.claim_new(vec![pkg("idna", "2.10")]);

        let second = claimed.claim_new(vec![pkg("idna", "2.10"), pkg("idna", "*")]);

        assert_eq!(second.len(), 1);
        assert_eq!(second[0].version(), "*");
        assert!(claimed.contains(&pkg("idna", "2.10").key()));
    }

    #[test]
    fn test_root_never_claimed_by_namesake() {
        let mut claimed = ClaimedPackages::new();
        claimed.claim_new(vec![Package::root()]);
        let namesake = pkg(crate::package_network::domain::ROOT_PACKAGE_NAME, "*");

        assert_eq!(claimed.claim_new(vec![namesake]).len(), 1);
    }

    #[test]
    fn test_retain_unseen() {
        let mut seen = SeenDependencies::new();
        let a = pkg("a", "1");
        let b = pkg("b", "1");
        let c = pkg("c", "1");
        let ab = Dependency::new(a.clone(), b.clone()).unwrap();
        let ac = Dependency::new(a.clone(), c.clone()).unwrap();

        let first = seen.retain_unseen(vec![ab.clone(), ab.clone()]);
        assert_eq!(first.len(), 1);

        let second = seen.retain_unseen(vec![ab, ac]);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].to().name(), "c");
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_mark_seen() {
        let mut seen = SeenDependencies::new();
        let edge = Dependency::new(Package::root(), pkg("a", "1")).unwrap();
        seen.mark_seen([&edge]);

        assert!(seen.retain_unseen(vec![edge]).is_empty());
    }
}
