//! # Cubedeck
//!
//! Typed, validated cube schema definitions for an analytics query engine.
//!
//! A cube maps a SQL relation onto measures, dimensions, joins, segments,
//! and pre-aggregation rules. This crate holds the declarative side only:
//! descriptors are parsed, validated, and frozen into a registry that a
//! query-planning engine reads. SQL generation, join resolution, and
//! refresh-key evaluation all happen in that engine, not here.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Schema files (TOML) / builder API               │
//! │   (cubes, joins, measures, dimensions, segments,         │
//! │    pre-aggregations)                                     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [loader]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Cube descriptors (typed)                 │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validation + registry build]
//! ┌─────────────────────────────────────────────────────────┐
//! │        CubeRegistry (frozen, read-only, versioned)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │        Query engine (external: SQL gen, caching)         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use cubedeck::prelude::*;
//!
//! let cube = Cube::new("Games", "SELECT * FROM games")
//!     .with_count("count")
//!     .with_dimension(Dimension::number("appId", "app_id").with_primary_key());
//!
//! let registry = RegistryBuilder::new().register(cube).build().unwrap();
//! assert!(registry.contains("Games"));
//! ```

pub mod catalog;
pub mod loader;
pub mod model;
pub mod registry;
pub mod validation;

pub use loader::{load_schema_dir, load_schema_file, load_schema_from_str, LoadError};
pub use model::{
    Cube, Dimension, DimensionType, Join, Measure, MeasureType, Placeholder, PreAggregation,
    PreAggregationKind, Relationship, Segment, SqlTemplate,
};
pub use registry::{CubeRegistry, RegistryBuilder, RegistryError};
pub use validation::{validate_cube, MemberKind, SchemaError, SchemaWarning};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::loader::{load_schema_dir, load_schema_file, load_schema_from_str, LoadError};
    pub use crate::model::{
        Cube, Dimension, DimensionType, Join, Measure, MeasureType, Placeholder, PreAggregation,
        PreAggregationKind, Relationship, Segment, SqlTemplate,
    };
    pub use crate::registry::{CubeRegistry, RegistryBuilder, RegistryError};
    pub use crate::validation::{validate_cube, MemberKind, SchemaError, SchemaWarning};
}
