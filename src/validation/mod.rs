//! Structural validation of cube descriptors.
//!
//! Validation runs at load time, before a cube is admitted to a registry.
//! Every violation in a cube is collected rather than stopping at the first,
//! so schema authors see the full picture in one pass. Column existence in
//! the backing store is deliberately not checked here; that is the data
//! store's concern and surfaces through the query engine at execution time.

use std::fmt;

use crate::model::{Cube, MeasureType};

/// Which kind of member an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Measure,
    Dimension,
    Segment,
    Join,
    PreAggregation,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberKind::Measure => "measure",
            MemberKind::Dimension => "dimension",
            MemberKind::Segment => "segment",
            MemberKind::Join => "join",
            MemberKind::PreAggregation => "pre-aggregation",
        };
        f.write_str(s)
    }
}

/// A fatal structural defect in a cube declaration.
///
/// Any of these prevents the cube from being registered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The cube has no source expression.
    #[error("cube '{cube}' has no source sql")]
    MissingSource { cube: String },

    /// A non-count measure lacks a source expression.
    #[error("measure '{cube}.{measure}' of type {measure_type} requires a sql expression")]
    MissingMeasureSql {
        cube: String,
        measure: String,
        measure_type: MeasureType,
    },

    /// A measure declared an unrecognized aggregation type.
    #[error("unknown aggregation type '{ty}' for measure '{cube}.{measure}'")]
    UnknownAggregationType {
        cube: String,
        measure: String,
        ty: String,
    },

    /// A dimension declared an unrecognized semantic type.
    #[error("unknown dimension type '{ty}' for dimension '{cube}.{dimension}'")]
    UnknownDimensionType {
        cube: String,
        dimension: String,
        ty: String,
    },

    /// A join declared an unrecognized relationship.
    #[error("unknown relationship '{relationship}' for join '{cube}.{join}'")]
    UnknownRelationship {
        cube: String,
        join: String,
        relationship: String,
    },

    /// A pre-aggregation declared an unrecognized kind.
    #[error("unknown pre-aggregation kind '{kind}' for '{cube}.{pre_aggregation}'")]
    UnknownPreAggregationKind {
        cube: String,
        pre_aggregation: String,
        kind: String,
    },

    /// A pre-aggregation references a member the cube does not define.
    #[error("pre-aggregation '{cube}.{pre_aggregation}' references undefined {kind} '{name}'")]
    DanglingReference {
        cube: String,
        pre_aggregation: String,
        kind: MemberKind,
        name: String,
    },

    /// A member is stored under a key that differs from its own name.
    #[error("{kind} registered under key '{key}' is named '{name}' in cube '{cube}'")]
    MismatchedMemberName {
        cube: String,
        kind: MemberKind,
        key: String,
        name: String,
    },
}

/// A non-fatal finding: the cube is still registered, but the schema author
/// should know.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaWarning {
    /// More than one dimension carries the primary-key flag. The cube is
    /// accepted as declared; consumers that need a single key take the first
    /// flagged dimension in name order.
    #[error("cube '{cube}' flags multiple primary key dimensions: {list}", list = .dimensions.join(", "))]
    MultiplePrimaryKeys {
        cube: String,
        /// Flagged dimension names, sorted
        dimensions: Vec<String>,
    },
}

/// Validate one cube's internal structure.
///
/// Returns the collected warnings on success, or every error found on
/// failure. Cross-cube checks (join target resolution) are deferred to
/// registry build since targets may be declared later.
pub fn validate_cube(cube: &Cube) -> Result<Vec<SchemaWarning>, Vec<SchemaError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if cube.sql.is_empty() {
        errors.push(SchemaError::MissingSource {
            cube: cube.name.clone(),
        });
    }

    check_member_keys(cube, &mut errors);
    check_measure_sources(cube, &mut errors);
    check_pre_aggregation_references(cube, &mut errors);
    check_primary_keys(cube, &mut warnings);

    if errors.is_empty() {
        Ok(warnings)
    } else {
        errors.sort_by_key(|e| e.to_string());
        Err(errors)
    }
}

fn check_member_keys(cube: &Cube, errors: &mut Vec<SchemaError>) {
    let mut mismatch = |kind: MemberKind, key: &str, name: &str| {
        if key != name {
            errors.push(SchemaError::MismatchedMemberName {
                cube: cube.name.clone(),
                kind,
                key: key.to_string(),
                name: name.to_string(),
            });
        }
    };

    for (key, measure) in &cube.measures {
        mismatch(MemberKind::Measure, key, &measure.name);
    }
    for (key, dimension) in &cube.dimensions {
        mismatch(MemberKind::Dimension, key, &dimension.name);
    }
    for (key, segment) in &cube.segments {
        mismatch(MemberKind::Segment, key, &segment.name);
    }
    for (key, join) in &cube.joins {
        mismatch(MemberKind::Join, key, &join.target);
    }
    for (key, rule) in &cube.pre_aggregations {
        mismatch(MemberKind::PreAggregation, key, &rule.name);
    }
}

fn check_measure_sources(cube: &Cube, errors: &mut Vec<SchemaError>) {
    for measure in cube.measures.values() {
        let missing = match &measure.sql {
            None => measure.measure_type.requires_sql(),
            Some(sql) => sql.is_empty() && measure.measure_type.requires_sql(),
        };
        if missing {
            errors.push(SchemaError::MissingMeasureSql {
                cube: cube.name.clone(),
                measure: measure.name.clone(),
                measure_type: measure.measure_type,
            });
        }
    }
}

fn check_pre_aggregation_references(cube: &Cube, errors: &mut Vec<SchemaError>) {
    for rule in cube.pre_aggregations.values() {
        for name in &rule.measures {
            if !cube.measures.contains_key(name) {
                errors.push(SchemaError::DanglingReference {
                    cube: cube.name.clone(),
                    pre_aggregation: rule.name.clone(),
                    kind: MemberKind::Measure,
                    name: name.clone(),
                });
            }
        }
        for name in &rule.dimensions {
            if !cube.dimensions.contains_key(name) {
                errors.push(SchemaError::DanglingReference {
                    cube: cube.name.clone(),
                    pre_aggregation: rule.name.clone(),
                    kind: MemberKind::Dimension,
                    name: name.clone(),
                });
            }
        }
    }
}

fn check_primary_keys(cube: &Cube, warnings: &mut Vec<SchemaWarning>) {
    let flagged = cube.primary_keys();
    if flagged.len() > 1 {
        warnings.push(SchemaWarning::MultiplePrimaryKeys {
            cube: cube.name.clone(),
            dimensions: flagged.iter().map(|d| d.name.clone()).collect(),
        });
    }
}
