//! Measure definitions - aggregatable quantities on a cube.

use inflector::Inflector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sql::SqlTemplate;

/// Aggregation applied to a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureType {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    CountDistinct,
    RunningTotal,
}

impl MeasureType {
    /// The wire spelling used in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Count => "count",
            MeasureType::Sum => "sum",
            MeasureType::Avg => "avg",
            MeasureType::Min => "min",
            MeasureType::Max => "max",
            MeasureType::CountDistinct => "countDistinct",
            MeasureType::RunningTotal => "runningTotal",
        }
    }

    /// Whether measures of this type need an explicit source expression.
    ///
    /// `count` counts rows of the cube itself, so it is the one type that
    /// works without a `sql` field.
    pub fn requires_sql(&self) -> bool {
        !matches!(self, MeasureType::Count)
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an aggregation type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aggregation type '{0}'")]
pub struct ParseMeasureTypeError(pub String);

impl FromStr for MeasureType {
    type Err = ParseMeasureTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(MeasureType::Count),
            "sum" => Ok(MeasureType::Sum),
            "avg" => Ok(MeasureType::Avg),
            "min" => Ok(MeasureType::Min),
            "max" => Ok(MeasureType::Max),
            "countDistinct" => Ok(MeasureType::CountDistinct),
            "runningTotal" => Ok(MeasureType::RunningTotal),
            other => Err(ParseMeasureTypeError(other.to_string())),
        }
    }
}

/// A named aggregatable quantity on a cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Member name (e.g. "totalReviews")
    pub name: String,

    /// Aggregation type
    #[serde(rename = "type")]
    pub measure_type: MeasureType,

    /// Source expression to aggregate. Optional for `count`, which counts
    /// rows of the cube itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<SqlTemplate>,

    /// Display title; defaults to a humanized form of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional row filter applied before aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SqlTemplate>,
}

impl Measure {
    /// Create a measure with no source expression.
    pub fn new(name: impl Into<String>, measure_type: MeasureType) -> Self {
        Self {
            name: name.into(),
            measure_type,
            sql: None,
            title: None,
            description: None,
            filter: None,
        }
    }

    /// A row-count measure.
    pub fn count(name: impl Into<String>) -> Self {
        Self::new(name, MeasureType::Count)
    }

    /// A sum over the given expression.
    pub fn sum(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, MeasureType::Sum).with_sql(sql)
    }

    /// An average over the given expression.
    pub fn avg(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, MeasureType::Avg).with_sql(sql)
    }

    /// A distinct count of the given expression.
    pub fn count_distinct(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self::new(name, MeasureType::CountDistinct).with_sql(sql)
    }

    /// Set the source expression.
    pub fn with_sql(mut self, sql: impl Into<SqlTemplate>) -> Self {
        self.sql = Some(sql.into());
        self
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

    /// Set a row filter applied before aggregation.
    pub fn with_filter(mut self, filter: impl Into<SqlTemplate>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The explicit title, or the member name humanized ("totalReviews"
    /// becomes "Total Reviews").
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.name.to_title_case(),
        }
    }
}
