use super::{Ecosystem, VulnerabilitySummary};
use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Version sentinel meaning "latest / unconstrained"
pub const LATEST_VERSION: &str = "*";

/// Name given to the synthetic package standing for the user's project
pub const ROOT_PACKAGE_NAME: &str = "project-root";

/// NewType wrapper for package name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        // '@' and '/' only appear in scoped npm names such as @types/node
        if !name.chars().all(|c| {
            c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '@' || c == '/'
        }) {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, dots, '@' and '/' are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for package version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        // '!' covers PEP 440 epochs, '*' the latest sentinel
        if !version.chars().all(|c| {
            c.is_alphanumeric() || c == '.' || c == '-' || c == '+' || c == '*' || c == '!'
        }) {
            anyhow::bail!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, plus, '!' and asterisks are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    /// The `"*"` sentinel
    pub fn latest() -> Self {
        Self(LATEST_VERSION.to_string())
    }

    pub fn is_latest(&self) -> bool {
        self.0 == LATEST_VERSION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a package node: name + version, plus the root flag so the
/// synthetic root never collides with a real package of the same name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageKey {
    name: String,
    version: String,
    is_root: bool,
}

impl PackageKey {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

impl std::fmt::Display for PackageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Package value object representing one node of the network
///
/// Packages are immutable: attaching vulnerability data returns a new value.
/// Equality and hashing follow [`PackageKey`], so two packages differing only
/// in their vulnerability summary are the same node.
#[derive(Debug, Clone)]
pub struct Package {
    name: PackageName,
    version: Version,
    ecosystem: Option<Ecosystem>,
    vulnerabilities: Option<VulnerabilitySummary>,
    is_root: bool,
}

impl Package {
    pub fn new(name: String, version: String) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            version: Version::new(version)?,
            ecosystem: None,
            vulnerabilities: None,
            is_root: false,
        })
    }

    /// Creates a package tagged with the ecosystem whose registry resolves it
    pub fn with_ecosystem(name: String, version: String, ecosystem: Ecosystem) -> Result<Self> {
        let mut package = Self::new(name, version)?;
        package.ecosystem = Some(ecosystem);
        Ok(package)
    }

    /// The synthetic package representing the user's own project
    pub fn root() -> Self {
        Self {
            name: PackageName(ROOT_PACKAGE_NAME.to_string()),
            version: Version::latest(),
            ecosystem: None,
            vulnerabilities: None,
            is_root: true,
        }
    }

    /// Returns a copy of this package carrying the given vulnerability summary
    pub fn annotated(&self, summary: VulnerabilitySummary) -> Self {
        Self {
            vulnerabilities: Some(summary),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn is_latest(&self) -> bool {
        self.version.is_latest()
    }

    pub fn ecosystem(&self) -> Option<Ecosystem> {
        self.ecosystem
    }

    pub fn vulnerabilities(&self) -> Option<&VulnerabilitySummary> {
        self.vulnerabilities.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn key(&self) -> PackageKey {
        PackageKey {
            name: self.name.as_str().to_string(),
            version: self.version.as_str().to_string(),
            is_root: self.is_root,
        }
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.is_root == other.is_root && self.name == other.name && self.version == other.version
    }
}

impl Eq for Package {}

impl std::hash::Hash for Package {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
