use crate::package_network::domain::LATEST_VERSION;

/// A single requirement line split into its parts
///
/// `requests[security] (>=2.0) ; python_version < "3"` becomes
/// name `requests`, constraint `>=2.0`, marker `python_version < "3"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    constraint: String,
    marker: Option<String>,
}

impl Requirement {
    /// Parses a PEP 508 style requirement string
    ///
    /// Returns `None` for blank input or input that does not start with a
    /// valid distribution name.
    pub fn parse(input: &str) -> Option<Self> {
        let (spec, marker) = match input.split_once(';') {
            Some((spec, marker)) => (spec, Some(marker.trim().to_string())),
            None => (input, None),
        };
        let spec = spec.trim();

        let name_end = spec
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(spec.len());
        let name = &spec[..name_end];
        if name.is_empty() {
            return None;
        }

        let mut rest = spec[name_end..].trim_start();
        if rest.starts_with('[') {
            let close = rest.find(']')?;
            rest = rest[close + 1..].trim_start();
        }
        // URL requirements ("name @ https://...") carry no usable version
        if rest.starts_with('@') {
            rest = "";
        }
        let constraint = rest
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim()
            .to_string();

        Some(Self {
            name: name.to_string(),
            constraint,
            marker: marker.filter(|m| !m.is_empty()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> &str {
        &self.constraint
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// True when the requirement only applies with an extra selected
    pub fn is_extra_only(&self) -> bool {
        self.marker
            .as_deref()
            .is_some_and(|m| m.replace(' ', "").contains("extra=="))
    }

    /// Version this requirement resolves to for identity purposes
    pub fn pinned_version(&self) -> String {
        pinned_version(&self.constraint)
    }
}

/// Maps a PEP 440 constraint onto a concrete version or the latest sentinel
///
/// Only a single `==X` clause without wildcards pins; everything else,
/// including `===X`, ranges and compound clauses, yields `"*"`.
pub fn pinned_version(constraint: &str) -> String {
    let constraint = constraint.trim();
    if constraint.contains(',') || constraint.starts_with("===") {
        return LATEST_VERSION.to_string();
    }
    match constraint.strip_prefix("==") {
        Some(version) => {
            let version = version.trim();
            if version.is_empty() || version.contains('*') {
                LATEST_VERSION.to_string()
            } else {
                version.to_string()
            }
        }
        None => LATEST_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pinned() {
        let req = Requirement::parse("requests==2.25.1").unwrap();
        assert_eq!(req.name(), "requests");
        assert_eq!(req.constraint(), "==2.25.1");
        assert_eq!(req.pinned_version(), "2.25.1");
        assert!(req.marker().is_none());
    }

    #[test]
    fn test_parse_with_extras_and_marker() {
        let req = Requirement::parse("requests[socks] >= 2.0 ; python_version < \"3.8\"").unwrap();
        assert_eq!(req.name(), "requests");
        assert_eq!(req.constraint(), ">= 2.0");
        assert_eq!(req.marker(), Some("python_version < \"3.8\""));
        assert_eq!(req.pinned_version(), "*");
    }

    #[test]
    fn test_parse_parenthesized_constraint() {
        let req = Requirement::parse("idna (<3,>=2.5)").unwrap();
        assert_eq!(req.name(), "idna");
        assert_eq!(req.constraint(), "<3,>=2.5");
        assert_eq!(req.pinned_version(), "*");
    }

    #[test]
    fn test_parse_bare_name() {
        let req = Requirement::parse("flask").unwrap();
        assert_eq!(req.constraint(), "");
        assert_eq!(req.pinned_version(), "*");
    }

    #[test]
    fn test_parse_url_requirement() {
        let req = Requirement::parse("pip @ https://github.com/pypa/pip/archive/1.3.1.zip").unwrap();
        assert_eq!(req.name(), "pip");
        assert_eq!(req.pinned_version(), "*");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Requirement::parse("").is_none());
        assert!(Requirement::parse(">=1.0").is_none());
        assert!(Requirement::parse("broken[extra").is_none());
    }

    #[test]
    fn test_extra_only() {
        let req = Requirement::parse("PySocks!=1.5.7,>=1.5.6; extra == 'socks'").unwrap();
        assert!(req.is_extra_only());

        let req = Requirement::parse("chardet<5,>=3.0.2; python_version < \"3\"").unwrap();
        assert!(!req.is_extra_only());
    }

    #[test]
    fn test_pinned_version_rules() {
        assert_eq!(pinned_version("==1.0"), "1.0");
        assert_eq!(pinned_version(" == 1.0 "), "1.0");
        assert_eq!(pinned_version("==1.*"), "*");
        assert_eq!(pinned_version("===1.0"), "*");
        assert_eq!(pinned_version("==1.0,!=1.1"), "*");
        assert_eq!(pinned_version("~=1.0"), "*");
        assert_eq!(pinned_version("*"), "*");
    }
}
