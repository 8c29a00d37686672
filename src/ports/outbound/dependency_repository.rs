use crate::package_network::domain::{Ecosystem, Package};
use crate::shared::Result;
use async_trait::async_trait;

/// A direct requirement as reported by a registry
///
/// Not yet validated; the resolver turns it into a `Package` and skips
/// entries that fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredPackage {
    pub name: String,
    pub version: String,
}

impl RequiredPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// DependencyRepository port for looking up direct dependencies in a registry
///
/// One implementation serves one ecosystem. Implementations must be
/// `Send + Sync` so lookups can run concurrently.
#[async_trait]
pub trait DependencyRepository: Send + Sync {
    /// The ecosystem this repository answers for
    fn ecosystem(&self) -> Ecosystem;

    /// Fetches the direct dependencies of a package
    ///
    /// A version of `"*"` queries the registry's latest release.
    /// A package unknown to the registry yields an empty list.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails or times out
    /// - The registry answers with an unexpected status
    /// - The response cannot be parsed
    async fn fetch_direct_dependencies(&self, package: &Package) -> Result<Vec<RequiredPackage>>;
}
