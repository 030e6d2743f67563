//! Dependency graph construction.
//!
//! [`build`] walks the lockfile groups once, resolving child references through
//! an [`AliasIndex`] and recording nodes, edges, direct membership and labels
//! into a [`GraphBuilder`]. [`materialize`] then folds each node's labels into
//! the [`Dependency`] records handed to reporting.

use crate::lockfile::LockGroup;
use crate::package::PackageKey;
use serde::{Deserialize, Serialize};
use std::fmt;

mod builder;
mod index;
mod materialize;
mod resolve;

pub use builder::{DependencyGraph, GraphBuilder};
pub use index::AliasIndex;
pub use materialize::{materialize, DefaultEnvironment, Dependency};
pub use resolve::{build, BuildOutcome};

/// Graph node key. Entries reached through different aliases but resolving to
/// the same name and version are the same node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedIdentity {
    pub name: String,
    pub version: String,
}

impl ResolvedIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(), version: version.into() }
    }
}

/// Node identity of a lockfile group: the first alias's name plus the
/// resolved version.
pub(crate) fn identity_of(group: &LockGroup) -> ResolvedIdentity {
    ResolvedIdentity::new(group.aliases.first().full_name(), group.entry.version.clone())
}

impl fmt::Display for ResolvedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl Serialize for ResolvedIdentity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Development => f.write_str("development"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Environment(Environment),
    Location(String),
}

/// Data-quality problems found while building. None of them stop the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// A child reference matched no lockfile alias; its edge was dropped.
    UnresolvedChild { source: String, parent: ResolvedIdentity, spec: PackageKey },
    /// Two different entries registered the same alias; the later one won.
    AliasCollision { source: String, alias: PackageKey, kept: ResolvedIdentity, replaced: ResolvedIdentity },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnresolvedChild { source, parent, spec } => {
                write!(f, "{source}: could not resolve {spec} (required by {parent})")
            }
            Warning::AliasCollision { source, alias, kept, replaced } => {
                write!(f, "{source}: alias {alias} registered by both {replaced} and {kept}; using {kept}")
            }
        }
    }
}
