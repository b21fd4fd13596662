//! Schema descriptor types.
//!
//! A [`Cube`] is a named logical table backed by a SQL source expression,
//! together with its measures, dimensions, joins, segments, and
//! pre-aggregation rules. Descriptors are built once at load time and are
//! immutable afterwards; the consuming query engine reads them on every
//! query but never mutates them.

pub mod dimension;
pub mod join;
pub mod measure;
pub mod pre_aggregation;
pub mod segment;
pub mod sql;

pub use dimension::{Dimension, DimensionType, ParseDimensionTypeError};
pub use join::{Join, ParseRelationshipError, Relationship};
pub use measure::{Measure, MeasureType, ParseMeasureTypeError};
pub use pre_aggregation::{ParsePreAggregationKindError, PreAggregation, PreAggregationKind};
pub use segment::Segment;
pub use sql::{Placeholder, SqlTemplate, OWN_CUBE};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named logical table with its members.
///
/// Members live in name-keyed maps; the key and the member's own `name`
/// field must agree (checked by validation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cube {
    /// Cube name, unique within a registry (e.g. "RecentTopGames")
    pub name: String,

    /// Source expression the cube is backed by. May reference the cube's
    /// own alias via `${CUBE}`.
    pub sql: SqlTemplate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Joins to other cubes, keyed by target cube name
    #[serde(default)]
    pub joins: HashMap<String, Join>,

    #[serde(default)]
    pub measures: HashMap<String, Measure>,

    #[serde(default)]
    pub dimensions: HashMap<String, Dimension>,

    #[serde(default)]
    pub segments: HashMap<String, Segment>,

    #[serde(default)]
    pub pre_aggregations: HashMap<String, PreAggregation>,
}

impl Cube {
    /// Create a cube backed by the given source expression.
    pub fn new(name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            title: None,
            description: None,
            joins: HashMap::new(),
            measures: HashMap::new(),
            dimensions: HashMap::new(),
            segments: HashMap::new(),
            pre_aggregations: HashMap::new(),
        }
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

    /// Add a join, keyed by its target cube.
    pub fn with_join(mut self, join: Join) -> Self {
        self.joins.insert(join.target.clone(), join);
        self
    }

    /// Add a measure.
    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measures.insert(measure.name.clone(), measure);
        self
    }

    /// Add a row-count measure.
    pub fn with_count(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.measures.insert(name.clone(), Measure::count(name));
        self
    }

    /// Add a SUM measure.
    pub fn with_sum(mut self, name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        let name = name.into();
        self.measures.insert(name.clone(), Measure::sum(name, sql));
        self
    }

    /// Add an AVG measure.
    pub fn with_avg(mut self, name: impl Into<String>, sql: impl Into<SqlTemplate>) -> Self {
        let name = name.into();
        self.measures.insert(name.clone(), Measure::avg(name, sql));
        self
    }

    /// Add a dimension.
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.insert(dimension.name.clone(), dimension);
        self
    }

    /// Add a segment.
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.insert(segment.name.clone(), segment);
        self
    }

    /// Add a pre-aggregation rule.
    pub fn with_pre_aggregation(mut self, rule: PreAggregation) -> Self {
        self.pre_aggregations.insert(rule.name.clone(), rule);
        self
    }

    /// Look up a measure by name.
    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.measures.get(name)
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.get(name)
    }

    /// Look up a segment by name.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.get(name)
    }

    /// Look up a join by target cube name.
    pub fn join(&self, target: &str) -> Option<&Join> {
        self.joins.get(target)
    }

    /// Look up a pre-aggregation rule by name.
    pub fn pre_aggregation(&self, name: &str) -> Option<&PreAggregation> {
        self.pre_aggregations.get(name)
    }

    /// All dimensions flagged as primary key, sorted by name.
    pub fn primary_keys(&self) -> Vec<&Dimension> {
        let mut keys: Vec<&Dimension> = self
            .dimensions
            .values()
            .filter(|d| d.primary_key)
            .collect();
        keys.sort_by(|a, b| a.name.cmp(&b.name));
        keys
    }

    /// The cube's primary key dimension, if one is flagged. When several are
    /// flagged (a validation warning), the first in name order wins.
    pub fn primary_key(&self) -> Option<&Dimension> {
        self.primary_keys().into_iter().next()
    }

    /// The explicit title, or the cube name humanized.
    pub fn display_title(&self) -> String {
        use inflector::Inflector;
        match &self.title {
            Some(title) => title.clone(),
            None => self.name.to_title_case(),
        }
    }
}
