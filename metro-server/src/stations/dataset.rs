//! Static station dataset DTOs and loader.
//!
//! The dataset is a JSON document shaped `line -> { code -> { name, index } }`,
//! read once at startup. Everything downstream works with the validated
//! [`StationDirectory`](super::StationDirectory) built from it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Line;

/// One station entry as persisted in the dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct StationEntry {
    /// Display name of the station.
    pub name: String,
    /// Ordinal position along the owning line.
    pub index: u32,
}

/// The raw dataset: line -> platform code -> entry.
pub type Dataset = BTreeMap<Line, BTreeMap<String, StationEntry>>;

/// Errors from loading or validating the station dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Reading the dataset file failed
    #[error("failed to read station dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset file is not valid JSON of the expected shape
    #[error("failed to parse station dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// A platform code does not parse
    #[error("invalid station code {code:?} on the {line} line")]
    BadCode { line: Line, code: String },

    /// Two stations on one line claim the same position
    #[error("duplicate index {index} on the {line} line")]
    DuplicateIndex { line: Line, index: u32 },
}

/// Read and parse a dataset file. Validation happens when the directory is
/// built from it.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Parse a dataset from a JSON string.
pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_dataset() {
        let json = r#"{
            "red": {
                "A01": { "name": "Metro Center", "index": 15 },
                "A03": { "name": "Dupont Circle", "index": 13 }
            }
        }"#;

        let dataset = parse_dataset(json).unwrap();
        let red = dataset.get(&Line::Red).unwrap();
        assert_eq!(red.len(), 2);
        assert_eq!(red.get("A01").unwrap().name, "Metro Center");
        assert_eq!(red.get("A03").unwrap().index, 13);
    }

    #[test]
    fn reject_unknown_line_key() {
        let json = r#"{ "purple": {} }"#;
        assert!(parse_dataset(json).is_err());
    }

    #[test]
    fn reject_malformed_entry() {
        let json = r#"{ "red": { "A01": { "name": "Metro Center" } } }"#;
        assert!(parse_dataset(json).is_err());
    }
}
