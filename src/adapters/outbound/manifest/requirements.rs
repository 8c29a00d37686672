use super::ManifestFormat;
use crate::package_network::domain::{Ecosystem, Package};
use crate::package_network::services::Requirement;
use crate::shared::Result;
use anyhow::Context;

/// `requirements*.txt` files
pub struct RequirementsTxtFormat;

impl RequirementsTxtFormat {
    pub fn new() -> Self {
        Self
    }

    /// Joins backslash continuations and strips comments
    fn logical_lines(content: &str) -> Vec<(usize, String)> {
        let mut lines = Vec::new();
        let mut pending: Option<(usize, String)> = None;

        for (index, raw) in content.lines().enumerate() {
            let line = Self::strip_comment(raw);
            let (start, mut joined) = pending.take().unwrap_or((index + 1, String::new()));
            match line.trim_end().strip_suffix('\\') {
                Some(head) => {
                    joined.push_str(head);
                    joined.push(' ');
                    pending = Some((start, joined));
                }
                None => {
                    joined.push_str(line);
                    lines.push((start, joined));
                }
            }
        }
        if let Some(last) = pending {
            lines.push(last);
        }
        lines
    }

    /// A `#` opens a comment at line start or after any whitespace
    fn strip_comment(raw: &str) -> &str {
        let mut previous: Option<char> = None;
        for (pos, c) in raw.char_indices() {
            if c == '#' && previous.map_or(true, char::is_whitespace) {
                return &raw[..pos];
            }
            previous = Some(c);
        }
        raw
    }

    fn is_skipped(line: &str) -> bool {
        line.is_empty()
            || line.starts_with('-')
            || line.contains("://")
            || line.starts_with("git+")
            || line.starts_with('.')
            || line.starts_with('/')
    }
}

impl Default for RequirementsTxtFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestFormat for RequirementsTxtFormat {
    fn supports_file(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        lower.starts_with("requirements") && lower.ends_with(".txt")
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPI
    }

    fn parse_content(&self, content: &str) -> Result<Vec<Package>> {
        let mut packages = Vec::new();

        for (line_number, line) in Self::logical_lines(content) {
            // per-requirement options such as --hash trail the specifier
            let line = line.split(" -").next().unwrap_or_default().trim();
            if Self::is_skipped(line) {
                continue;
            }

            let Some(requirement) = Requirement::parse(line) else {
                tracing::debug!(line = line_number, "Skipping unrecognised requirement");
                continue;
            };

            let package = Package::with_ecosystem(
                requirement.name().to_string(),
                requirement.pinned_version(),
                Ecosystem::PyPI,
            )
            .with_context(|| format!("line {}", line_number))?;
            packages.push(package);
        }

        Ok(packages)
    }
}
