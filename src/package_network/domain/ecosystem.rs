use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Package-manager universe a package belongs to
///
/// The display form matches the ecosystem names used by OSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Ecosystem {
    #[serde(rename = "PyPI")]
    PyPI,
    #[serde(rename = "npm")]
    Npm,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::PyPI => "PyPI",
            Ecosystem::Npm => "npm",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pypi" | "python" | "pip" => Ok(Ecosystem::PyPI),
            "npm" | "node" | "javascript" => Ok(Ecosystem::Npm),
            _ => Err(format!(
                "Invalid ecosystem: {}. Please specify 'pypi' or 'npm'",
                s
            )),
        }
    }
}
