use package_network::prelude::*;
use std::path::Path;

/// Mock ManifestReader serving one in-memory manifest
pub struct MockManifestReader {
    pub manifest: Manifest,
    pub should_fail: bool,
}

impl MockManifestReader {
    pub fn new(file_name: &str, content: &str) -> Self {
        Self {
            manifest: Manifest::new(file_name.to_string(), content.to_string()),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            manifest: Manifest::new(String::new(), String::new()),
            should_fail: true,
        }
    }
}

impl ManifestReader for MockManifestReader {
    fn read_manifest(&self, _path: &Path) -> Result<Manifest> {
        if self.should_fail {
            anyhow::bail!("Mock manifest read failure");
        }
        Ok(self.manifest.clone())
    }
}
