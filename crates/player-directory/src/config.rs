//! Directory configuration, loaded from YAML.
//!
//! ```yaml
//! pagination:
//!   default_page_size: 25
//!   max_page_size: 200
//! ```
//!
//! Every key is optional; missing ones take the library defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use specula::PaginationConfig;

use crate::error::{DirectoryError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub pagination: PaginationConfig,
}

impl DirectoryConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: DirectoryConfig = serde_yaml::from_str(source)?;
        config.pagination.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DirectoryError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&source)
    }
}
