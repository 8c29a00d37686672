use crate::application::read_models::{
    LevelView, NetworkReadModel, NetworkReadModelBuilder, NetworkSummaryView, PackageView,
    VulnerabilityView,
};
use crate::package_network::domain::{NetworkMetadata, PackageNetwork, Severity};
use crate::ports::outbound::NetworkFormatter;
use crate::shared::Result;

/// Markdown table header for package information
const TABLE_HEADER: &str = "| Package | Version | Ecosystem | Vulnerabilities |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|-----------|-----------------|\n";

/// Markdown table header for vulnerability information
const VULN_TABLE_HEADER: &str =
    "| Package | Current Version | Level | Fixed Version | CVSS | Severity | ID | CVE ID |\n";

/// Markdown table separator line for vulnerability table
const VULN_TABLE_SEPARATOR: &str =
    "|---------|-----------------|-------|---------------|------|----------|----|--------|\n";

/// MarkdownFormatter adapter for a human-readable network report
///
/// This adapter implements the NetworkFormatter port: a summary, one
/// section per level with its package table and edge list, then the
/// vulnerability table.
pub struct MarkdownFormatter {
    vulnerabilities_checked: bool,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            vulnerabilities_checked: true,
        }
    }

    /// For builds that skipped the vulnerability lookup: the report says so
    /// instead of claiming there are no known vulnerabilities
    pub fn without_vulnerability_check() -> Self {
        Self {
            vulnerabilities_checked: false,
        }
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
        if count == 1 {
            singular
        } else {
            plural
        }
    }

    fn severity_emoji(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "🔴",
            Severity::High => "🟠",
            Severity::Medium => "🟡",
            Severity::Low => "🟢",
            Severity::Unknown => "⚪",
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &NetworkReadModel) {
        output.push_str("# Package Network\n\n");
        output.push_str(&format!(
            "Generated by {} {} at {} (max levels: {}).\n\n",
            model.metadata.tool_name,
            model.metadata.tool_version,
            model.metadata.timestamp,
            model.metadata.max_levels
        ));
    }

    fn render_summary(&self, output: &mut String, summary: &NetworkSummaryView) {
        output.push_str("## Summary\n\n");
        output.push_str(&format!("- Levels: {}\n", summary.level_count));
        output.push_str(&format!("- Packages: {}\n", summary.package_count));
        output.push_str(&format!("- Dependencies: {}\n", summary.dependency_count));
        output.push_str(&format!(
            "- Vulnerable packages: {}\n",
            summary.vulnerable_package_count
        ));
        if let Some(severity) = summary.max_severity {
            output.push_str(&format!(
                "- Highest severity: {} {}\n",
                Self::severity_emoji(severity),
                severity
            ));
        }
        output.push('\n');
    }

    fn render_level(&self, output: &mut String, level: &LevelView) {
        if level.index == 0 {
            output.push_str("## Level 0: Direct Dependencies\n\n");
        } else {
            output.push_str(&format!("## Level {}\n\n", level.index));
        }

        let packages: Vec<&PackageView> = level.packages.iter().filter(|p| !p.is_root).collect();
        if packages.is_empty() {
            output.push_str("*No packages*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for package in packages {
            let vulnerabilities = match package.severity {
                Some(severity) => format!(
                    "{} {} ({})",
                    Self::severity_emoji(severity),
                    severity,
                    package.vulnerability_count
                ),
                None => "None".to_string(),
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&package.name),
                Self::escape_markdown_table_cell(&package.version),
                package.ecosystem.as_deref().unwrap_or("N/A"),
                vulnerabilities
            ));
        }
        output.push('\n');

        if !level.edges.is_empty() {
            output.push_str("**Edges**\n\n");
            for edge in &level.edges {
                output.push_str(&format!("- `{}` → `{}`\n", edge.from, edge.to));
            }
            output.push('\n');
        }
    }

    fn render_vulnerabilities(&self, output: &mut String, vulns: &[VulnerabilityView]) {
        output.push_str("## Vulnerability Report\n\n");

        if !self.vulnerabilities_checked {
            output.push_str("*Vulnerability check skipped for this build*\n");
            return;
        }

        if vulns.is_empty() {
            output.push_str("*No known vulnerabilities*\n");
            return;
        }

        let unique_packages = vulns
            .iter()
            .map(|v| v.package_id.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len();
        output.push_str(&format!(
            "**Found {} {} in {} {}.**\n\n",
            vulns.len(),
            Self::plural(vulns.len(), "vulnerability", "vulnerabilities"),
            unique_packages,
            Self::plural(unique_packages, "package", "packages")
        ));

        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);
        for vuln in vulns {
            self.render_vulnerability_row(output, vuln);
        }

        output.push_str("\n---\n\n");
        output
            .push_str("*Vulnerability data provided by [OSV](https://osv.dev) under CC-BY 4.0*\n");
    }

    fn render_vulnerability_row(&self, output: &mut String, vuln: &VulnerabilityView) {
        let cvss_display = if vuln.score > 0.0 {
            format!("{:.1}", vuln.score)
        } else {
            "N/A".to_string()
        };

        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} {} | {} | {} |\n",
            Self::escape_markdown_table_cell(&vuln.package_name),
            Self::escape_markdown_table_cell(&vuln.package_version),
            vuln.level,
            Self::escape_markdown_table_cell(vuln.fixed_version.as_deref().unwrap_or("N/A")),
            cvss_display,
            Self::severity_emoji(vuln.severity),
            vuln.severity,
            Self::escape_markdown_table_cell(&vuln.id),
            vuln.external_id.as_deref().unwrap_or("N/A"),
        ));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkFormatter for MarkdownFormatter {
    fn format(&self, network: &PackageNetwork, metadata: &NetworkMetadata) -> Result<String> {
        let model = NetworkReadModelBuilder::build(network, metadata);
        let mut output = String::new();

        self.render_header(&mut output, &model);
        self.render_summary(&mut output, &model.summary);
        for level in &model.levels {
            self.render_level(&mut output, level);
        }
        self.render_vulnerabilities(&mut output, &model.vulnerabilities);

        Ok(output)
    }
}
