use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - network built, no vulnerability at or above the threshold
    Success = 0,
    /// A package in the network reached the configured severity threshold
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (manifest, registry dispatch, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Stage of a network build, used to tell the caller where a build aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    ReadManifest,
    ParseManifest,
    Seed,
    Resolve { level: usize },
    Validate,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStage::ReadManifest => write!(f, "reading manifest"),
            BuildStage::ParseManifest => write!(f, "parsing manifest"),
            BuildStage::Seed => write!(f, "seeding level 0"),
            BuildStage::Resolve { level } => write!(f, "resolving level {}", level),
            BuildStage::Validate => write!(f, "validating network"),
        }
    }
}

/// Application-specific errors for package network construction.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping user-facing messages next to the variants they describe.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Manifest file not found: {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to process manifest file: {file_name}\nDetails: {details}\n\n💡 Hint: Please verify that the manifest is readable and well-formed")]
    FileProcessing { file_name: String, details: String },

    #[error("Unsupported manifest format: {file_name}\n\n💡 Hint: Supported manifests are requirements*.txt, Pipfile and package.json")]
    UnsupportedFormat { file_name: String },

    #[error("Ecosystem unknown for package {package}\n\n💡 Hint: Every package handed to the resolver must carry an ecosystem tag")]
    UnknownEcosystem { package: String },

    #[error("No resolver registered for ecosystem '{ecosystem}'")]
    NoResolverRegistered { ecosystem: String },

    #[error("Package {package} cannot depend on itself")]
    SelfDependency { package: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Network creation failed while {stage}")]
    NetworkCreationFailed {
        stage: BuildStage,
        #[source]
        source: anyhow::Error,
    },
}

impl NetworkError {
    /// Wraps any failure of a build stage into the single build-level error
    pub fn creation_failed(stage: BuildStage, source: anyhow::Error) -> Self {
        NetworkError::NetworkCreationFailed { stage, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::VulnerabilitiesDetected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::VulnerabilitiesDetected),
            "Vulnerabilities Detected (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_build_stage_display() {
        assert_eq!(BuildStage::ParseManifest.to_string(), "parsing manifest");
        assert_eq!(
            BuildStage::Resolve { level: 2 }.to_string(),
            "resolving level 2"
        );
    }

    #[test]
    fn test_manifest_not_found_display() {
        let error = NetworkError::ManifestNotFound {
            path: PathBuf::from("/test/requirements.txt"),
            suggestion: "Test suggestion".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Manifest file not found"));
        assert!(display.contains("/test/requirements.txt"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Test suggestion"));
    }

    #[test]
    fn test_unknown_ecosystem_names_package() {
        let error = NetworkError::UnknownEcosystem {
            package: "requests@2.25.1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Ecosystem unknown"));
        assert!(display.contains("requests@2.25.1"));
    }

    #[test]
    fn test_no_resolver_registered_names_tag() {
        let error = NetworkError::NoResolverRegistered {
            ecosystem: "npm".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "No resolver registered for ecosystem 'npm'"
        );
    }

    #[test]
    fn test_creation_failed_keeps_stage_and_cause() {
        let cause = anyhow::anyhow!("registry exploded");
        let error = NetworkError::creation_failed(BuildStage::Resolve { level: 1 }, cause);
        let display = format!("{}", error);
        assert_eq!(display, "Network creation failed while resolving level 1");
        // the cause is reported once, through the source chain
        assert!(!display.contains("registry exploded"));

        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "registry exploded");
    }

    #[test]
    fn test_unsupported_format_display() {
        let error = NetworkError::UnsupportedFormat {
            file_name: "Gemfile".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unsupported manifest format: Gemfile"));
        assert!(display.contains("package.json"));
    }
}
