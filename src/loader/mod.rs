//! Schema loaders for declarative cube files.
//!
//! Cube declarations are TOML documents keyed by cube name:
//!
//! ```toml
//! [cubes.RecentTopGames]
//! sql = "SELECT * FROM recent_top_games"
//!
//! [cubes.RecentTopGames.measures.totalReviews]
//! sql = "COALESCE(total_positive, 0) + COALESCE(total_negative, 0)"
//! type = "sum"
//! title = "Total Reviews"
//! ```
//!
//! Parsing is two-phase: serde reads the file shape into raw config structs
//! with string-typed `type`/`relationship` fields, then lowering converts
//! them into model types, attaching cube and member context to every error.
//! A file that fails either phase yields no cubes at all.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use crate::model::{
    Cube, Dimension, DimensionType, Join, Measure, MeasureType, PreAggregation,
    PreAggregationKind, Relationship, Segment,
};
use crate::validation::SchemaError;

/// Errors that can occur when loading a schema.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File not found
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// IO error reading a file or directory
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("failed to parse schema file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The declaration parsed but is structurally invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type for schema loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load every cube declared in a TOML string.
///
/// Cubes come back in name order. Any error leaves nothing registered.
pub fn load_schema_from_str(content: &str) -> LoadResult<Vec<Cube>> {
    let file: SchemaFile = toml::from_str(content)?;
    file.cubes
        .into_iter()
        .map(|(name, config)| lower_cube(name, config).map_err(LoadError::from))
        .collect()
}

/// Load a schema file from a path.
pub fn load_schema_file(path: &Path) -> LoadResult<Vec<Cube>> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    load_schema_from_str(&content)
}

/// Load every `*.toml` file in a directory, in file-name order.
pub fn load_schema_dir(dir: &Path) -> LoadResult<Vec<Cube>> {
    if !dir.exists() {
        return Err(LoadError::FileNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("toml"))
        .collect();
    paths.sort();

    let mut cubes = Vec::new();
    for path in paths {
        cubes.extend(load_schema_file(&path)?);
    }
    Ok(cubes)
}

// ---------------------------------------------------------------------------
// Raw file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    cubes: BTreeMap<String, CubeConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CubeConfig {
    sql: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    joins: BTreeMap<String, JoinConfig>,
    #[serde(default)]
    measures: BTreeMap<String, MeasureConfig>,
    #[serde(default)]
    dimensions: BTreeMap<String, DimensionConfig>,
    #[serde(default)]
    segments: BTreeMap<String, SegmentConfig>,
    #[serde(default, rename = "preAggregations")]
    pre_aggregations: BTreeMap<String, PreAggregationConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JoinConfig {
    sql: String,
    relationship: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeasureConfig {
    sql: Option<String>,
    #[serde(rename = "type")]
    measure_type: String,
    title: Option<String>,
    description: Option<String>,
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DimensionConfig {
    sql: String,
    #[serde(rename = "type")]
    dimension_type: String,
    title: Option<String>,
    description: Option<String>,
    #[serde(default, rename = "primaryKey")]
    primary_key: bool,
    #[serde(default = "default_shown")]
    shown: bool,
}

fn default_shown() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SegmentConfig {
    sql: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PreAggregationConfig {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    measures: Vec<String>,
    #[serde(default)]
    dimensions: Vec<String>,
    #[serde(rename = "refreshKey")]
    refresh_key: Option<RefreshKeyConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RefreshKeyConfig {
    sql: String,
}

// ---------------------------------------------------------------------------
// Lowering
// ---------------------------------------------------------------------------

fn lower_cube(name: String, config: CubeConfig) -> Result<Cube, SchemaError> {
    let sql = match config.sql {
        Some(sql) if !sql.trim().is_empty() => sql,
        _ => return Err(SchemaError::MissingSource { cube: name }),
    };

    let mut cube = Cube::new(&name, sql);
    cube.title = config.title;
    cube.description = config.description;

    for (target, join) in config.joins {
        cube = cube.with_join(lower_join(&name, target, join)?);
    }
    for (member, measure) in config.measures {
        cube = cube.with_measure(lower_measure(&name, member, measure)?);
    }
    for (member, dimension) in config.dimensions {
        cube = cube.with_dimension(lower_dimension(&name, member, dimension)?);
    }
    for (member, segment) in config.segments {
        cube = cube.with_segment(Segment::new(member, segment.sql));
    }
    for (member, rule) in config.pre_aggregations {
        cube = cube.with_pre_aggregation(lower_pre_aggregation(&name, member, rule)?);
    }
    Ok(cube)
}

fn lower_join(cube: &str, target: String, config: JoinConfig) -> Result<Join, SchemaError> {
    let relationship = Relationship::from_str(&config.relationship).map_err(|e| {
        SchemaError::UnknownRelationship {
            cube: cube.to_string(),
            join: target.clone(),
            relationship: e.0,
        }
    })?;
    Ok(Join::new(target, config.sql, relationship))
}

fn lower_measure(cube: &str, name: String, config: MeasureConfig) -> Result<Measure, SchemaError> {
    let measure_type = MeasureType::from_str(&config.measure_type).map_err(|e| {
        SchemaError::UnknownAggregationType {
            cube: cube.to_string(),
            measure: name.clone(),
            ty: e.0,
        }
    })?;

    let mut measure = Measure::new(name, measure_type);
    measure.sql = config.sql.map(Into::into);
    measure.title = config.title;
    measure.description = config.description;
    measure.filter = config.filter.map(Into::into);
    Ok(measure)
}

fn lower_dimension(
    cube: &str,
    name: String,
    config: DimensionConfig,
) -> Result<Dimension, SchemaError> {
    let dimension_type = DimensionType::from_str(&config.dimension_type).map_err(|e| {
        SchemaError::UnknownDimensionType {
            cube: cube.to_string(),
            dimension: name.clone(),
            ty: e.0,
        }
    })?;

    let mut dimension = Dimension::new(name, dimension_type, config.sql);
    dimension.title = config.title;
    dimension.description = config.description;
    dimension.primary_key = config.primary_key;
    dimension.shown = config.shown;
    Ok(dimension)
}

fn lower_pre_aggregation(
    cube: &str,
    name: String,
    config: PreAggregationConfig,
) -> Result<PreAggregation, SchemaError> {
    let kind = PreAggregationKind::from_str(&config.kind).map_err(|e| {
        SchemaError::UnknownPreAggregationKind {
            cube: cube.to_string(),
            pre_aggregation: name.clone(),
            kind: e.0,
        }
    })?;

    let mut rule = PreAggregation::rollup(name);
    rule.kind = kind;
    rule.measures = config.measures;
    rule.dimensions = config.dimensions;
    rule.refresh_key = config.refresh_key.map(|k| k.sql.into());
    Ok(rule)
}
