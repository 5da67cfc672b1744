//! File extension dispatch.

use std::fmt;
use std::path::Path;

use crate::rules::RuleError;

/// Supported rule file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Yaml,
    Json,
}

impl RuleFormat {
    /// Pick a format from the file name's extension.
    ///
    /// `.yaml` and `.yml` select YAML, `.json` selects JSON. Matching is
    /// case-sensitive. Anything else, including no extension, is rejected.
    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        match extension.as_str() {
            ".yaml" | ".yml" => Ok(RuleFormat::Yaml),
            ".json" => Ok(RuleFormat::Json),
            _ => Err(RuleError::UnsupportedFormat { extension }),
        }
    }
}

impl fmt::Display for RuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleFormat::Yaml => write!(f, "YAML"),
            RuleFormat::Json => write!(f, "JSON"),
        }
    }
}
