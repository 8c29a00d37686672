//! Version pinning for npm-style semantic version specifiers

/// Returns the version when `spec` names exactly one semantic version
///
/// Accepts an optional `=` or `v` prefix. Ranges, tags, wildcards and
/// URLs yield `None`.
pub fn exact_semver(spec: &str) -> Option<String> {
    let spec = spec.trim();
    let spec = spec.strip_prefix('=').unwrap_or(spec).trim_start();
    let spec = spec.strip_prefix('v').unwrap_or(spec);

    let core_end = spec.find(['-', '+']).unwrap_or(spec.len());
    let core: Vec<&str> = spec[..core_end].split('.').collect();
    let numeric = core.len() == 3
        && core
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    let suffix_ok = spec[core_end..]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'));

    (numeric && suffix_ok).then(|| spec.to_string())
}
