//! Output records: the registry of derived artifacts.
//!
//! Each artifact written during completion processing gets one record keyed
//! by (`document_id`, `output_type`). Records are append-only and guarded by
//! write-if-absent, so replaying a completion notification does not create
//! duplicate rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of derived artifact, with its exact registry string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Raw concatenated analysis payload (`TEXTRACT-RESPONSE`).
    RawResponse,
    /// Per-page form key/value table (`FORM-<page>`).
    Form { page: u32 },
    /// Per-table cell grid (`TABLE-<page>-<index>`, index 1-based per page).
    Table { page: u32, index: u32 },
    /// Detected named entities (`COMPREHEND-ENTITIES`).
    Entities,
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawResponse => write!(f, "TEXTRACT-RESPONSE"),
            Self::Form { page } => write!(f, "FORM-{page}"),
            Self::Table { page, index } => write!(f, "TABLE-{page}-{index}"),
            Self::Entities => write!(f, "COMPREHEND-ENTITIES"),
        }
    }
}

/// Error parsing an output type string.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized output type: {0}")]
pub struct ParseOutputTypeError(String);

impl FromStr for OutputType {
    type Err = ParseOutputTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXTRACT-RESPONSE" => return Ok(Self::RawResponse),
            "COMPREHEND-ENTITIES" => return Ok(Self::Entities),
            _ => {}
        }
        if let Some(page) = s.strip_prefix("FORM-") {
            let page = page
                .parse()
                .map_err(|_| ParseOutputTypeError(s.to_string()))?;
            return Ok(Self::Form { page });
        }
        if let Some(rest) = s.strip_prefix("TABLE-") {
            if let Some((page, index)) = rest.split_once('-') {
                let page = page
                    .parse()
                    .map_err(|_| ParseOutputTypeError(s.to_string()))?;
                let index = index
                    .parse()
                    .map_err(|_| ParseOutputTypeError(s.to_string()))?;
                return Ok(Self::Table { page, index });
            }
        }
        Err(ParseOutputTypeError(s.to_string()))
    }
}

impl Serialize for OutputType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OutputType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Registry entry for one derived artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub document_id: String,
    pub output_type: OutputType,
    /// Artifact-store location of the derived file.
    pub output_path: String,
}

impl OutputRecord {
    pub fn new(document_id: String, output_type: OutputType, output_path: String) -> Self {
        Self {
            document_id,
            output_type,
            output_path,
        }
    }
}
