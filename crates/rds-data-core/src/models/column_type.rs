// ABOUTME: Declared value type of a column as used by the schema registry
// ABOUTME: Parses short names and wire tags alike, displays in lowercase

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DataLayerError;

/// Value type of a column, as declared in the schema registry
///
/// Schema documents may use any name [`FromStr`] accepts, including the wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ColumnType {
    /// Text
    String,
    /// 64-bit signed integer
    Long,
    /// Double precision float
    Double,
    /// Boolean
    Boolean,
    /// Binary, sent base64 encoded
    Blob,
}

impl ColumnType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Long => "long",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Blob => "blob",
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = DataLayerError;

    /// Accepts the short names and the wire tags (`string`, `stringValue`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "text" | "stringvalue" => Ok(Self::String),
            "long" | "integer" | "int" | "longvalue" => Ok(Self::Long),
            "double" | "float" | "doublevalue" => Ok(Self::Double),
            "boolean" | "bool" | "booleanvalue" => Ok(Self::Boolean),
            "blob" | "binary" | "blobvalue" => Ok(Self::Blob),
            other => Err(DataLayerError::invalid_argument(format!(
                "unsupported column type '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for ColumnType {
    type Error = DataLayerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
