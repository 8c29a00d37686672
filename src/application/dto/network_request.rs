use std::path::PathBuf;

/// Number of levels built when the caller does not say otherwise
pub const DEFAULT_MAX_LEVELS: usize = 3;

/// NetworkRequest - Internal request DTO for the network build use case
#[derive(Debug, Clone)]
pub struct NetworkRequest {
    /// Path to the manifest file
    pub manifest_path: PathBuf,
    /// Cap on the total number of levels; 0 and 1 both build level 0 only
    pub max_levels: usize,
}

impl NetworkRequest {
    pub fn new(manifest_path: PathBuf) -> Self {
        Self {
            manifest_path,
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }

    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }
}
