//! Segment definitions - named reusable filter predicates.

use serde::{Deserialize, Serialize};

use super::sql::SqlTemplate;

/// A named boolean predicate attachable to any query against the cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Member name (e.g. "veryPositiveOrBetter")
    pub name: String,

    /// Filter predicate
    pub sql: SqlTemplate,
}

impl Segment {
    pub fn new(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }
}
