//! Pre-aggregation rules - materialization policies for cached rollups.
//!
//! The rule only names the members to materialize and how to detect
//! staleness; scheduling, storage, and invalidation of the materialized
//! results belong to the consuming query engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sql::SqlTemplate;

/// Kind of materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreAggregationKind {
    /// An aggregate table over the listed measures, grouped by the listed
    /// dimensions.
    Rollup,
}

impl PreAggregationKind {
    /// The wire spelling used in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreAggregationKind::Rollup => "rollup",
        }
    }
}

impl fmt::Display for PreAggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a pre-aggregation kind string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pre-aggregation kind '{0}'")]
pub struct ParsePreAggregationKindError(pub String);

impl FromStr for PreAggregationKind {
    type Err = ParsePreAggregationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rollup" => Ok(PreAggregationKind::Rollup),
            other => Err(ParsePreAggregationKindError(other.to_string())),
        }
    }
}

/// A named materialization policy on a cube.
///
/// Every measure and dimension listed here must be defined on the same
/// cube; validation rejects dangling names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreAggregation {
    /// Rule name (e.g. "main")
    pub name: String,

    /// Kind of materialization
    #[serde(rename = "type")]
    pub kind: PreAggregationKind,

    /// Names of measures to materialize
    pub measures: Vec<String>,

    /// Names of dimensions to group by
    pub dimensions: Vec<String>,

    /// Staleness probe: the engine re-evaluates this expression and compares
    /// against a stored checkpoint to decide whether the rollup is stale.
    /// When absent the engine falls back to its default refresh policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_key: Option<SqlTemplate>,
}

impl PreAggregation {
    /// Create a rollup rule with no members yet.
    pub fn rollup(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PreAggregationKind::Rollup,
            measures: vec![],
            dimensions: vec![],
            refresh_key: None,
        }
    }

    /// Add a measure reference.
    pub fn with_measure(mut self, name: impl Into<String>) -> Self {
        self.measures.push(name.into());
        self
    }

    /// Add a dimension reference.
    pub fn with_dimension(mut self, name: impl Into<String>) -> Self {
        self.dimensions.push(name.into());
        self
    }

    /// Set the refresh-key expression.
    pub fn with_refresh_key(mut self, sql: impl Into<SqlTemplate>) -> Self {
        self.refresh_key = Some(sql.into());
        self
    }
}
