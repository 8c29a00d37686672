use crate::shared::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ordinal severity used to aggregate vulnerability risk
///
/// Variant order is the ordering: `Unknown` is the floor, `Critical` the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Maps a CVSS base score onto the CVSS v3 qualitative rating scale
    pub fn from_cvss_score(score: CvssScore) -> Self {
        let value = score.value();
        if value >= 9.0 {
            Severity::Critical
        } else if value >= 7.0 {
            Severity::High
        } else if value >= 4.0 {
            Severity::Medium
        } else if value > 0.0 {
            Severity::Low
        } else {
            Severity::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "HIGH" => Ok(Severity::High),
            "MEDIUM" | "MODERATE" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            "UNKNOWN" => Ok(Severity::Unknown),
            _ => Err(format!(
                "Invalid severity: {}. Please specify one of critical, high, medium, low",
                s
            )),
        }
    }
}

/// CVSS base score in the range 0.0..=10.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CvssScore(f32);

impl CvssScore {
    pub fn new(value: f32) -> Result<Self> {
        if !(0.0..=10.0).contains(&value) {
            anyhow::bail!("CVSS score must be between 0.0 and 10.0, got {}", value);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

/// A single known vulnerability affecting a package
#[derive(Debug, Clone, PartialEq)]
pub struct Vulnerability {
    name: String,
    severity: Severity,
    score: CvssScore,
    external_id: Option<String>,
    fixed_version: Option<String>,
}

impl Vulnerability {
    pub fn new(
        name: String,
        severity: Severity,
        score: f32,
        external_id: Option<String>,
        fixed_version: Option<String>,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("Vulnerability name cannot be empty");
        }
        Ok(Self {
            name,
            severity,
            score: CvssScore::new(score)?,
            external_id,
            fixed_version,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn score(&self) -> f32 {
        self.score.value()
    }

    /// Cross-reference such as a CVE number
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    pub fn fixed_version(&self) -> Option<&str> {
        self.fixed_version.as_deref()
    }
}

/// Vulnerabilities attached to one package, with their aggregated severity
///
/// Never empty: a package without known vulnerabilities carries no summary.
#[derive(Debug, Clone, PartialEq)]
pub struct VulnerabilitySummary {
    vulnerabilities: Vec<Vulnerability>,
    overall_severity: Severity,
}

impl VulnerabilitySummary {
    /// Returns `None` for an empty list
    pub fn from_vulnerabilities(vulnerabilities: Vec<Vulnerability>) -> Option<Self> {
        let overall_severity = vulnerabilities.iter().map(|v| v.severity()).max()?;
        Some(Self {
            vulnerabilities,
            overall_severity,
        })
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn overall_severity(&self) -> Severity {
        self.overall_severity
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }
}

/// Vulnerabilities reported by a repository for one (name, version) pair
#[derive(Debug, Clone)]
pub struct PackageVulnerabilities {
    package_name: String,
    version: String,
    vulnerabilities: Vec<Vulnerability>,
}

impl PackageVulnerabilities {
    pub fn new(package_name: String, version: String, vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            package_name,
            version,
            vulnerabilities,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn into_vulnerabilities(self) -> Vec<Vulnerability> {
        self.vulnerabilities
    }
}
