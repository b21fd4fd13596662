//! Dimension definitions - groupable and filterable attributes of a cube.

use inflector::Inflector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sql::SqlTemplate;

/// Default value for `shown` in serde deserialization.
fn default_shown() -> bool {
    true
}

/// Semantic type of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionType {
    Number,
    String,
    Time,
    Boolean,
}

impl DimensionType {
    /// The wire spelling used in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionType::Number => "number",
            DimensionType::String => "string",
            DimensionType::Time => "time",
            DimensionType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dimension type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension type '{0}'")]
pub struct ParseDimensionTypeError(pub String);

impl FromStr for DimensionType {
    type Err = ParseDimensionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(DimensionType::Number),
            "string" => Ok(DimensionType::String),
            "time" => Ok(DimensionType::Time),
            "boolean" => Ok(DimensionType::Boolean),
            other => Err(ParseDimensionTypeError(other.to_string())),
        }
    }
}

/// A named attribute of a cube, usable for grouping and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Member name (e.g. "reviewScoreDesc")
    pub name: String,

    /// Semantic type
    #[serde(rename = "type")]
    pub dimension_type: DimensionType,

    /// Source expression, usually a bare column name
    pub sql: SqlTemplate,

    /// Display title; defaults to a humanized form of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Marks the cube's primary key. At most one dimension per cube should
    /// carry this flag; extra flags are reported as a validation warning.
    #[serde(default)]
    pub primary_key: bool,

    /// Visibility hint for consuming tools. Defaults to visible.
    #[serde(default = "default_shown")]
    pub shown: bool,
}

impl Dimension {
    pub fn new(
        name: impl Into<String>,
        dimension_type: DimensionType,
        sql: impl Into<SqlTemplate>,
    ) -> Self {
        Self {
            name: name.into(),
            dimension_type,
            sql: sql.into(),
            title: None,
            description: None,
            primary_key: false,
            shown: true,
        }
    }

    /// A number-typed dimension.
    pub fn number(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, DimensionType::Number, sql)
    }

    /// A string-typed dimension.
    pub fn string(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, DimensionType::String, sql)
    }

    /// A time-typed dimension.
    pub fn time(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, DimensionType::Time, sql)
    }

    /// A boolean-typed dimension.
    pub fn boolean(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, DimensionType::Boolean, sql)
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Flag this dimension as the cube's primary key.
    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set the visibility hint.
    pub fn with_shown(mut self, shown: bool) -> Self {
        self.shown = shown;
        self
    }

    /// The explicit title, or the member name humanized ("reviewScoreDesc"
    /// becomes "Review Score Desc").
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.name.to_title_case(),
        }
    }
}
