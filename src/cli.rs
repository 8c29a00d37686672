use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Settings;
use package_network::application::dto::OutputFormat;
use package_network::package_network::domain::Severity;

/// Build a leveled, vulnerability-annotated dependency network from a manifest
#[derive(Parser, Debug)]
#[command(name = "package-network")]
#[command(version)]
#[command(
    about = "Build a leveled, vulnerability-annotated dependency network from a manifest",
    long_about = None
)]
pub struct Args {
    /// Manifest file: requirements*.txt, Pipfile or package.json
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Maximum number of levels to build (level 0 is always built)
    #[arg(short = 'l', long, value_name = "N")]
    pub max_levels: Option<usize>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (defaults to package-network.config.yml next to the manifest)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Exit with code 1 when a package reaches this severity (critical, high, medium, low)
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Skip vulnerability lookups
    #[arg(long)]
    pub no_vulnerabilities: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlays the flags given on the command line
    pub fn apply_to(&self, mut settings: Settings) -> Settings {
        if let Some(max_levels) = self.max_levels {
            settings.max_levels = max_levels;
        }
        // an explicit --format beats the output file's extension
        if let Some(format) = self
            .format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_output_path))
        {
            settings.format = format;
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(fail_on) = self.fail_on {
            settings.fail_on = Some(fail_on);
        }
        if self.no_vulnerabilities {
            settings.check_vulnerabilities = false;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("package-network").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_minimal_args() {
        let args = parse(&["requirements.txt"]);
        assert_eq!(args.manifest, PathBuf::from("requirements.txt"));
        assert!(args.max_levels.is_none());
        assert!(args.format.is_none());
        assert!(!args.no_vulnerabilities);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "package.json",
            "-l",
            "2",
            "-f",
            "md",
            "-o",
            "out.md",
            "--timeout",
            "5",
            "--fail-on",
            "high",
            "--no-vulnerabilities",
            "-v",
        ]);
        assert_eq!(args.max_levels, Some(2));
        assert_eq!(args.format, Some(OutputFormat::Markdown));
        assert_eq!(args.output, Some(PathBuf::from("out.md")));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.fail_on, Some(Severity::High));
        assert!(args.no_vulnerabilities);
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_manifest_is_rejected() {
        assert!(Args::try_parse_from(["package-network"]).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Args::try_parse_from(["package-network", "a.txt", "-f", "xml"]).is_err());
        assert!(Args::try_parse_from(["package-network", "a.txt", "--timeout", "0"]).is_err());
        assert!(Args::try_parse_from(["package-network", "a.txt", "--fail-on", "severe"]).is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            max_levels: 5,
            check_vulnerabilities: true,
            ..Settings::default()
        };
        let args = parse(&["requirements.txt", "-l", "1", "--no-vulnerabilities"]);

        let settings = args.apply_to(settings);
        assert_eq!(settings.max_levels, 1);
        assert!(!settings.check_vulnerabilities);
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let settings = Settings {
            max_levels: 5,
            format: OutputFormat::Markdown,
            ..Settings::default()
        };
        let args = parse(&["requirements.txt"]);

        let settings = args.apply_to(settings.clone());
        assert_eq!(settings.max_levels, 5);
        assert_eq!(settings.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_output_extension_selects_format() {
        let args = parse(&["requirements.txt", "-o", "network.md"]);
        assert_eq!(args.apply_to(Settings::default()).format, OutputFormat::Markdown);

        let args = parse(&["requirements.txt", "-o", "network.md", "-f", "json"]);
        assert_eq!(args.apply_to(Settings::default()).format, OutputFormat::Json);

        let markdown = Settings {
            format: OutputFormat::Markdown,
            ..Settings::default()
        };
        let args = parse(&["requirements.txt", "-o", "network.out"]);
        assert_eq!(args.apply_to(markdown).format, OutputFormat::Markdown);
    }
}
