/// NetworkMetadata value object describing one network build
#[derive(Debug, Clone)]
pub struct NetworkMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    build_id: String,
    max_levels: usize,
}

impl NetworkMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        build_id: String,
        max_levels: usize,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            build_id,
            max_levels,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// Level cap requested for the build
    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_metadata_new() {
        let metadata = NetworkMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "package-network".to_string(),
            "0.1.0".to_string(),
            "urn:uuid:12345".to_string(),
            3,
        );

        assert_eq!(metadata.timestamp(), "2024-01-01T00:00:00Z");
        assert_eq!(metadata.tool_name(), "package-network");
        assert_eq!(metadata.tool_version(), "0.1.0");
        assert_eq!(metadata.build_id(), "urn:uuid:12345");
        assert_eq!(metadata.max_levels(), 3);
    }
}
