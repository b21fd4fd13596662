//! Unresolved SQL fragment templates.
//!
//! Schema SQL is stored verbatim, placeholders included. `${CUBE}` stands for
//! the owning cube's alias and `${OtherCube.member}` for a member of another
//! cube; substitution happens in the consuming query engine at generation
//! time, never here. The only operation this module performs is recognizing
//! the placeholders so cross-cube references can be checked at registry build.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Name the owning cube is referred to by inside its own SQL.
pub const OWN_CUBE: &str = "CUBE";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:\.([A-Za-z_][A-Za-z0-9_]*))?\}")
        .expect("placeholder pattern is valid")
});

/// A SQL fragment with unresolved `${...}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlTemplate(String);

impl SqlTemplate {
    pub fn new(sql: impl Into<String>) -> Self {
        SqlTemplate(sql.into())
    }

    /// The raw template text, placeholders included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the template holds no SQL at all (blank counts as empty).
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// All placeholders in the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        PLACEHOLDER
            .captures_iter(&self.0)
            .map(|cap| {
                let cube = &cap[1];
                let member = cap.get(2).map(|m| m.as_str().to_string());
                match (cube == OWN_CUBE, member) {
                    (true, None) => Placeholder::OwnCube,
                    (true, Some(member)) => Placeholder::OwnMember { member },
                    (false, None) => Placeholder::Cube {
                        cube: cube.to_string(),
                    },
                    (false, Some(member)) => Placeholder::Member {
                        cube: cube.to_string(),
                        member,
                    },
                }
            })
            .collect()
    }

    /// Names of other cubes this template refers to, deduplicated and sorted.
    pub fn referenced_cubes(&self) -> Vec<String> {
        let mut cubes: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter_map(|p| match p {
                Placeholder::Cube { cube } | Placeholder::Member { cube, .. } => Some(cube),
                Placeholder::OwnCube | Placeholder::OwnMember { .. } => None,
            })
            .collect();
        cubes.sort();
        cubes.dedup();
        cubes
    }
}

impl From<&str> for SqlTemplate {
    fn from(sql: &str) -> Self {
        SqlTemplate::new(sql)
    }
}

impl From<String> for SqlTemplate {
    fn from(sql: String) -> Self {
        SqlTemplate::new(sql)
    }
}

impl std::fmt::Display for SqlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single `${...}` occurrence inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// `${CUBE}` - the owning cube's alias.
    OwnCube,
    /// `${CUBE.member}` - a member of the owning cube.
    OwnMember { member: String },
    /// `${OtherCube}` - another cube's alias.
    Cube { cube: String },
    /// `${OtherCube.member}` - a member of another cube.
    Member { cube: String, member: String },
}
