//! The cube registry - write-once at startup, read-many thereafter.
//!
//! A [`RegistryBuilder`] accumulates descriptors during process
//! initialization; [`RegistryBuilder::build`] validates every cube, resolves
//! cross-cube join references, and freezes the result into an immutable
//! [`CubeRegistry`]. The registry is an explicit value passed to whoever
//! needs it, never an implicit singleton, and once built it may be read
//! concurrently without synchronization since nothing mutates it.

use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::model::{Cube, SqlTemplate};
use crate::validation::{validate_cube, SchemaError, SchemaWarning};

/// Error raised while building a registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Two cubes were registered under the same name.
    #[error("cube '{0}' is already registered")]
    DuplicateCube(String),

    /// A cube failed structural validation.
    #[error("cube '{cube}' failed validation: {list}", list = render_errors(.errors))]
    InvalidCube {
        cube: String,
        errors: Vec<SchemaError>,
    },

    /// A join names a cube that is not in the registry. Raised at build
    /// time since join targets may be declared after the declaring cube.
    #[error("join on cube '{cube}' targets unknown cube '{target}'")]
    UnknownJoinTarget { cube: String, target: String },
}

fn render_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates cube descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    cubes: Vec<Cube>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cube. Duplicate names are detected at build time.
    pub fn register(mut self, cube: Cube) -> Self {
        self.cubes.push(cube);
        self
    }

    /// Add every cube from an iterator.
    pub fn register_all(mut self, cubes: impl IntoIterator<Item = Cube>) -> Self {
        self.cubes.extend(cubes);
        self
    }

    /// Validate, resolve join targets, and freeze.
    ///
    /// Checks run in registration order: duplicate names first, then each
    /// cube's structural validation, then the deferred cross-cube check that
    /// every join target (both the declared target name and any cube named
    /// by a placeholder in the join predicate) is registered. Warnings from
    /// validation are retained on the frozen registry.
    pub fn build(self) -> Result<CubeRegistry, RegistryError> {
        let mut cubes: HashMap<String, Cube> = HashMap::with_capacity(self.cubes.len());
        let mut warnings = Vec::new();

        for cube in self.cubes {
            if cubes.contains_key(&cube.name) {
                return Err(RegistryError::DuplicateCube(cube.name));
            }
            match validate_cube(&cube) {
                Ok(mut cube_warnings) => warnings.append(&mut cube_warnings),
                Err(errors) => {
                    return Err(RegistryError::InvalidCube {
                        cube: cube.name,
                        errors,
                    })
                }
            }
            cubes.insert(cube.name.clone(), cube);
        }

        check_join_targets(&cubes)?;

        let version = fingerprint(&cubes);
        Ok(CubeRegistry {
            cubes,
            warnings,
            version,
        })
    }
}

fn check_join_targets(cubes: &HashMap<String, Cube>) -> Result<(), RegistryError> {
    let mut names: Vec<&String> = cubes.keys().collect();
    names.sort();

    for name in names {
        let cube = &cubes[name];
        let mut targets: Vec<(String, &SqlTemplate)> = cube
            .joins
            .values()
            .map(|j| (j.target.clone(), &j.on))
            .collect();
        targets.sort_by(|a, b| a.0.cmp(&b.0));

        for (target, on) in targets {
            if !cubes.contains_key(&target) {
                return Err(RegistryError::UnknownJoinTarget {
                    cube: cube.name.clone(),
                    target,
                });
            }
            for referenced in on.referenced_cubes() {
                if referenced != cube.name && !cubes.contains_key(&referenced) {
                    return Err(RegistryError::UnknownJoinTarget {
                        cube: cube.name.clone(),
                        target: referenced,
                    });
                }
            }
        }
    }
    Ok(())
}

/// SHA-256 over the canonical JSON form of every cube, sorted by name.
///
/// `serde_json` maps are ordered, so two registries built from identical
/// declarations fingerprint identically regardless of insertion order.
fn fingerprint(cubes: &HashMap<String, Cube>) -> String {
    let mut sorted: Vec<&Cube> = cubes.values().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    // Infallible: schema types serialize to plain JSON data.
    let canonical = json!(sorted).to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The frozen, read-only registry of cube descriptors.
#[derive(Debug, Clone)]
pub struct CubeRegistry {
    cubes: HashMap<String, Cube>,
    warnings: Vec<SchemaWarning>,
    version: String,
}

impl CubeRegistry {
    /// Look up a cube by name.
    pub fn get(&self, name: &str) -> Option<&Cube> {
        self.cubes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cubes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Iterate over every cube, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.values()
    }

    /// Cube names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cubes.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Non-fatal findings retained from build (e.g. multiple primary keys).
    pub fn warnings(&self) -> &[SchemaWarning] {
        &self.warnings
    }

    /// Content fingerprint of the whole schema. Identical declarations
    /// produce identical versions; any member change produces a new one.
    /// Suitable as a cache-key component for the consuming engine.
    pub fn schema_version(&self) -> &str {
        &self.version
    }
}
