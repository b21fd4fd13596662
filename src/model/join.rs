//! Join declarations between cubes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sql::SqlTemplate;

/// Cardinality of a join, seen from the declaring cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relationship {
    BelongsTo,
    HasOne,
    HasMany,
}

impl Relationship {
    /// The wire spelling used in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::BelongsTo => "belongsTo",
            Relationship::HasOne => "hasOne",
            Relationship::HasMany => "hasMany",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a relationship string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relationship '{0}'")]
pub struct ParseRelationshipError(pub String);

impl FromStr for Relationship {
    type Err = ParseRelationshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "belongsTo" => Ok(Relationship::BelongsTo),
            "hasOne" => Ok(Relationship::HasOne),
            "hasMany" => Ok(Relationship::HasMany),
            other => Err(ParseRelationshipError(other.to_string())),
        }
    }
}

/// A directed relationship from the declaring cube to another cube.
///
/// The target must be registered in the same registry; that check is
/// deferred to registry build time since the target may be declared later.
/// Joins may form cycles - resolution order is the query engine's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    /// Name of the cube being joined to
    pub target: String,

    /// Join predicate, referencing both sides via placeholders
    /// (e.g. `${CUBE}.app_id = ${GameTags.appId}`)
    pub on: SqlTemplate,

    /// Cardinality seen from the declaring cube
    pub relationship: Relationship,
}

impl Join {
    pub fn new(
        target: impl Into<String>,
        on: impl Into<SqlTemplate>,
        relationship: Relationship,
    ) -> Self {
        Self {
            target: target.into(),
            on: on.into(),
            relationship,
        }
    }
}
