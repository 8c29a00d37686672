use crate::package_network::domain::{
    CvssScore, Package, PackageVulnerabilities, Severity, Vulnerability,
};
use crate::ports::outbound::VulnerabilityRepository;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// OSV API client for fetching vulnerability data
///
/// Uses the OSV.dev batch query API to find advisory ids per package, then
/// fetches each advisory once to read its severity and fix information.
///
/// Packages pinned to the `"*"` sentinel are not queried: OSV matches
/// advisories against a concrete version, and a versionless query returns
/// every historical advisory of the package.
pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
    max_concurrent_details: usize,
}

impl OsvClient {
    const API_URL: &'static str = "https://api.osv.dev/v1";
    const MAX_BATCH_SIZE: usize = 100; // OSV API limit
    const MAX_CONCURRENT_DETAILS: usize = 10;

    /// Creates a new OSV API client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let user_agent = format!("package-network/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: Self::API_URL.to_string(),
            max_concurrent_details: Self::MAX_CONCURRENT_DETAILS,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_concurrent_details(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent_details = max_concurrent.max(1);
        self
    }

    fn build_batch_query(packages: &[Package]) -> OsvBatchQuery {
        let queries = packages
            .iter()
            .filter_map(|pkg| {
                Some(OsvQuery {
                    package: OsvPackage {
                        name: pkg.name().to_string(),
                        ecosystem: pkg.ecosystem()?.as_str().to_string(),
                    },
                    version: pkg.version().to_string(),
                })
            })
            .collect();
        OsvBatchQuery { queries }
    }

    /// Fetches advisory ids for a batch of packages
    async fn fetch_batch(&self, packages: &[Package]) -> Result<Vec<OsvResult>> {
        let batch_query = Self::build_batch_query(packages);
        let url = format!("{}/querybatch", self.api_url);

        let response = self.client.post(&url).json(&batch_query).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let batch_response: OsvBatchResponse = response.json().await?;
        if batch_response.results.len() != packages.len() {
            anyhow::bail!(
                "OSV API returned {} results for {} queries",
                batch_response.results.len(),
                packages.len()
            );
        }
        Ok(batch_response.results)
    }

    /// Fetches detailed vulnerability information by ID
    ///
    /// The batch API returns minimal information. Severity, aliases and
    /// fixed versions need the full record.
    async fn fetch_vulnerability_details(&self, vuln_id: &str) -> Result<OsvVulnerability> {
        validate_url_component(vuln_id, "Vulnerability id")?;
        let url = format!("{}/vulns/{}", self.api_url, urlencoding::encode(vuln_id));
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV API returned status code {} for vulnerability {}",
                response.status(),
                vuln_id
            );
        }

        Ok(response.json().await?)
    }

    /// Fetches every distinct advisory once, with bounded concurrency
    ///
    /// Advisories whose details cannot be fetched or converted are logged
    /// and left out.
    async fn fetch_all_details(&self, ids: HashSet<String>) -> HashMap<String, Vulnerability> {
        stream::iter(ids)
            .map(|id| async move {
                let result = self.fetch_vulnerability_details(&id).await;
                (id, result)
            })
            .buffer_unordered(self.max_concurrent_details)
            .filter_map(|(id, result)| async move {
                match result.and_then(|details| convert_to_vulnerability(&details)) {
                    Ok(vuln) => Some((id, vuln)),
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Failed to fetch vulnerability details");
                        None
                    }
                }
            })
            .collect()
            .await
    }
}

#[async_trait]
impl VulnerabilityRepository for OsvClient {
    async fn fetch_vulnerabilities(
        &self,
        packages: Vec<Package>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        let queryable: Vec<Package> = packages
            .into_iter()
            .filter(|p| !p.is_latest() && p.ecosystem().is_some())
            .collect();

        let mut batch_results: Vec<(Package, Vec<String>)> = Vec::new();
        for chunk in queryable.chunks(Self::MAX_BATCH_SIZE) {
            let osv_results = match self.fetch_batch(chunk).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(
                        packages = chunk.len(),
                        error = %format!("{:#}", e),
                        "OSV batch query failed; chunk left unannotated"
                    );
                    continue;
                }
            };
            for (package, osv_result) in chunk.iter().zip(osv_results) {
                if !osv_result.vulns.is_empty() {
                    let ids = osv_result.vulns.into_iter().map(|v| v.id).collect();
                    batch_results.push((package.clone(), ids));
                }
            }
        }

        let unique_ids: HashSet<String> = batch_results
            .iter()
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect();
        tracing::debug!(
            packages = batch_results.len(),
            advisories = unique_ids.len(),
            "OSV batch query complete"
        );
        let details = self.fetch_all_details(unique_ids).await;

        Ok(batch_results
            .into_iter()
            .filter_map(|(package, ids)| {
                let vulnerabilities: Vec<Vulnerability> =
                    ids.iter().filter_map(|id| details.get(id).cloned()).collect();
                (!vulnerabilities.is_empty()).then(|| {
                    PackageVulnerabilities::new(
                        package.name().to_string(),
                        package.version().to_string(),
                        vulnerabilities,
                    )
                })
            })
            .collect())
    }
}

/// Converts a single OSV vulnerability to domain model
///
/// Severity comes from the CVSS v3 vector when present, then from
/// `database_specific.severity`, and is `Unknown` otherwise.
fn convert_to_vulnerability(osv_vuln: &OsvVulnerability) -> Result<Vulnerability> {
    let cvss_score = osv_vuln
        .severity
        .as_ref()
        .and_then(|severities| severities.iter().find(|s| s.severity_type == "CVSS_V3"))
        .and_then(|s| parse_cvss_score(&s.score));

    let severity = if let Some(score) = cvss_score {
        Severity::from_cvss_score(score)
    } else if let Some(db_severity) = osv_vuln
        .database_specific
        .as_ref()
        .and_then(|db| db.severity.as_deref())
    {
        parse_severity_string(db_severity)
    } else {
        Severity::Unknown
    };

    let external_id = std::iter::once(&osv_vuln.id)
        .chain(osv_vuln.aliases.iter())
        .find(|id| id.starts_with("CVE-"))
        .cloned();

    let fixed_version = osv_vuln.affected.as_ref().and_then(|affected| {
        affected.iter().find_map(|a| {
            a.ranges
                .as_ref()?
                .iter()
                .find_map(|r| r.events.iter().find_map(|e| e.fixed.clone()))
        })
    });

    Vulnerability::new(
        osv_vuln.id.clone(),
        severity,
        cvss_score.map(|s| s.value()).unwrap_or(0.0),
        external_id,
        fixed_version,
    )
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String, // "PyPI" or "npm"
}

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    results: Vec<OsvResult>,
}

#[derive(Debug, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnerabilityRef>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerabilityRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    severity: Option<Vec<OsvSeverity>>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
    #[serde(default)]
    affected: Option<Vec<OsvAffected>>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String, // "CVSS_V3"
    score: String,         // e.g., "CVSS:3.1/AV:N/AC:L/..."
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>, // "CRITICAL", "HIGH", "MODERATE", "MEDIUM", "LOW"
}

#[derive(Debug, Deserialize)]
struct OsvAffected {
    #[serde(default)]
    ranges: Option<Vec<OsvRange>>,
}

#[derive(Debug, Deserialize)]
struct OsvRange {
    events: Vec<OsvEvent>,
}

#[derive(Debug, Deserialize)]
struct OsvEvent {
    #[serde(default)]
    fixed: Option<String>,
}

/// Extracts numeric CVSS score from CVSS vector string
///
/// Example: "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H" -> Some(9.8)
///
/// The base score is computed from the vector's metrics.
fn parse_cvss_score(cvss_vector: &str) -> Option<CvssScore> {
    // CVSS v3.1 metric values and their scores
    // This is a simplified scoring algorithm based on the Base Score formula

    // Parse metrics from vector string
    let metrics: HashMap<&str, &str> = cvss_vector
        .split('/')
        .skip(1) // Skip "CVSS:3.1" or "CVSS:3.0"
        .filter_map(|part| {
            let mut split = part.split(':');
            Some((split.next()?, split.next()?))
        })
        .collect();

    // Extract metric values
    let av = metrics.get("AV")?;
    let ac = metrics.get("AC")?;
    let pr = metrics.get("PR")?;
    let ui = metrics.get("UI")?;
    let s = metrics.get("S")?;
    let c = metrics.get("C")?;
    let i = metrics.get("I")?;
    let a = metrics.get("A")?;

    // Calculate exploitability sub-score
    let av_score = match *av {
        "N" => 0.85, // Network
        "A" => 0.62, // Adjacent
        "L" => 0.55, // Local
        "P" => 0.2,  // Physical
        _ => return None,
    };

    let ac_score = match *ac {
        "L" => 0.77, // Low
        "H" => 0.44, // High
        _ => return None,
    };

    let pr_score = match (*pr, *s) {
        ("N", _) => 0.85,   // None
        ("L", "U") => 0.62, // Low, Unchanged
        ("L", "C") => 0.68, // Low, Changed
        ("H", "U") => 0.27, // High, Unchanged
        ("H", "C") => 0.5,  // High, Changed
        _ => return None,
    };

    let ui_score = match *ui {
        "N" => 0.85, // None
        "R" => 0.62, // Required
        _ => return None,
    };

    // Calculate impact sub-score
    let c_score = match *c {
        "N" => 0.0,  // None
        "L" => 0.22, // Low
        "H" => 0.56, // High
        _ => return None,
    };

    let i_score = match *i {
        "N" => 0.0,  // None
        "L" => 0.22, // Low
        "H" => 0.56, // High
        _ => return None,
    };

    let a_score = match *a {
        "N" => 0.0,  // None
        "L" => 0.22, // Low
        "H" => 0.56, // High
        _ => return None,
    };

    // Calculate ISS (Impact Sub-Score)
    let iss = 1.0_f64 - ((1.0 - c_score) * (1.0 - i_score) * (1.0 - a_score));

    // Calculate Impact
    let impact = if *s == "U" {
        6.42 * iss
    } else {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02_f64).powi(15)
    };

    // Calculate Exploitability
    let exploitability = 8.22 * av_score * ac_score * pr_score * ui_score;

    // Calculate Base Score
    let base_score = if impact <= 0.0 {
        0.0
    } else if *s == "U" {
        f64::min(impact + exploitability, 10.0)
    } else {
        f64::min(1.08 * (impact + exploitability), 10.0)
    };

    // Round up to one decimal place
    let rounded_score = (base_score * 10.0).ceil() / 10.0;

    CvssScore::new(rounded_score as f32).ok()
}

/// Parses severity string from OSV database_specific field
///
/// Unrecognised values map to `Severity::Unknown`.
fn parse_severity_string(severity: &str) -> Severity {
    severity.parse().unwrap_or(Severity::Unknown)
}
