//! Rule decoding into a mapping table.

use std::path::Path;

use thiserror::Error;

use crate::routing::{MappingTable, PathEntry};
use crate::rules::RuleFormat;

/// Errors raised while turning a rule file into a table.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The file name does not carry a supported extension.
    #[error("Unsupported rule file extension '{extension}'")]
    UnsupportedFormat { extension: String },

    /// The bytes are not valid for the selected format, or entries have the wrong shape.
    #[error("Malformed {format} rules: {source}")]
    MalformedInput {
        format: RuleFormat,
        #[source]
        source: DecodeError,
    },
}

/// The underlying decode failure wrapped by [`RuleError::MalformedInput`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("entry {index} has an empty path")]
    EmptyPath { index: usize },
}

/// Decode `raw` as a rule file and build a table from it.
///
/// The format is chosen from `filename_hint`'s extension; the file itself is
/// never opened.
pub fn load(filename_hint: impl AsRef<Path>, raw: &[u8]) -> Result<MappingTable, RuleError> {
    let filename_hint = filename_hint.as_ref();
    let format = RuleFormat::from_path(filename_hint)?;

    let entries = decode_entries(format, raw)
        .map_err(|source| RuleError::MalformedInput { format, source })?;

    let declared = entries.len();
    let table = MappingTable::from_entries(entries);

    tracing::debug!(
        file = %filename_hint.display(),
        format = %format,
        declared,
        distinct = table.len(),
        "Rules decoded"
    );

    Ok(table)
}

/// Decode the ordered entry list without building a table.
pub fn decode_entries(format: RuleFormat, raw: &[u8]) -> Result<Vec<PathEntry>, DecodeError> {
    let entries: Vec<PathEntry> = match format {
        // An empty YAML document carries no rules.
        RuleFormat::Yaml if raw.iter().all(u8::is_ascii_whitespace) => Vec::new(),
        // A null document (`~`) is an empty rule list too.
        RuleFormat::Yaml => serde_yaml::from_slice::<Option<Vec<PathEntry>>>(raw)?.unwrap_or_default(),
        RuleFormat::Json => serde_json::from_slice(raw)?,
    };

    if let Some(index) = entries.iter().position(|entry| entry.path.is_empty()) {
        return Err(DecodeError::EmptyPath { index });
    }

    Ok(entries)
}
