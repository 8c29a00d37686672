use crate::package_network::domain::Manifest;
use crate::ports::outbound::ManifestReader;
use crate::shared::error::NetworkError;
use crate::shared::security::validate_manifest_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading manifests from the file system
///
/// This adapter implements the ManifestReader port. Symlinks, non-regular
/// files and oversized files are refused before any content is read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, path: &Path) -> Result<Manifest> {
        if fs::symlink_metadata(path).is_err() {
            return Err(NetworkError::ManifestNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "\"{}\" does not exist.\n   \
                     Pass the path of a requirements.txt, Pipfile or package.json file.",
                    path.display()
                ),
            }
            .into());
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        validate_manifest_file(path).map_err(|e| NetworkError::FileProcessing {
            file_name: file_name.clone(),
            details: e.to_string(),
        })?;

        let content = fs::read_to_string(path).map_err(|e| NetworkError::FileProcessing {
            file_name: file_name.clone(),
            details: e.to_string(),
        })?;

        Ok(Manifest::new(file_name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_manifest_success() {
        let temp_dir = TempDir::new().unwrap();
        let manifest_path = temp_dir.path().join("requirements.txt");
        fs::write(&manifest_path, "requests==2.25.1\n").unwrap();

        let reader = FileSystemReader::new();
        let manifest = reader.read_manifest(&manifest_path).unwrap();

        assert_eq!(manifest.file_name(), "requirements.txt");
        assert_eq!(manifest.content(), "requests==2.25.1\n");
    }

    #[test]
    fn test_read_manifest_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_manifest(&temp_dir.path().join("requirements.txt"));

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Manifest file not found"));
    }

    #[test]
    fn test_read_manifest_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_manifest(temp_dir.path());

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_manifest_symlink_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.txt");
        let link = temp_dir.path().join("requirements.txt");
        fs::write(&target, "flask\n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let reader = FileSystemReader::new();
        let result = reader.read_manifest(&link);

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("symbolic link"));
    }
}
