use super::{Package, PackageKey};
use crate::shared::error::NetworkError;
use crate::shared::Result;

/// Identity of an edge: the ordered pair of endpoint identities
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyKey {
    from: PackageKey,
    to: PackageKey,
}

impl DependencyKey {
    pub fn from(&self) -> &PackageKey {
        &self.from
    }

    pub fn to(&self) -> &PackageKey {
        &self.to
    }
}

/// Directed edge meaning "`from` requires `to`"
#[derive(Debug, Clone)]
pub struct Dependency {
    from: Package,
    to: Package,
}

impl Dependency {
    /// Creates an edge, rejecting self-loops
    pub fn new(from: Package, to: Package) -> Result<Self> {
        if from.key() == to.key() {
            return Err(NetworkError::SelfDependency {
                package: from.to_string(),
            }
            .into());
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> &Package {
        &self.from
    }

    pub fn to(&self) -> &Package {
        &self.to
    }

    pub fn key(&self) -> DependencyKey {
        DependencyKey {
            from: self.from.key(),
            to: self.to.key(),
        }
    }

    /// Returns the same edge pointing at a replacement of its target
    ///
    /// Used after annotation so edges reference the annotated package.
    pub fn with_target(&self, to: Package) -> Result<Self> {
        Self::new(self.from.clone(), to)
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Dependency {}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
