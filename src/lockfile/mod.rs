//! Yarn lockfile model and loaders.
//!
//! A lockfile is lowered into a list of [`LockGroup`]s: one resolved entry plus
//! every alias (requested `name@range`) that resolved to it. Both Yarn classic
//! (`# yarn lockfile v1`) and Yarn modern (YAML with `__metadata`) are read
//! into the same shape.

use crate::error::{Error, Result};
use crate::package::PackageKey;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

mod berry;
mod remote;
mod v1;

pub use remote::RemoteDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockfileKind {
    YarnV1,
    YarnBerry,
}

impl fmt::Display for LockfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockfileKind::YarnV1 => f.write_str("yarn v1"),
            LockfileKind::YarnBerry => f.write_str("yarn berry"),
        }
    }
}

impl LockfileKind {
    /// The spec a manifest range takes in this dialect's alias keys.
    pub fn descriptor_spec(self, range: &str) -> String {
        match self {
            LockfileKind::YarnV1 => range.to_string(),
            LockfileKind::YarnBerry => berry::with_protocol(range),
        }
    }
}

/// Non-empty list of aliases, in the order the lockfile header lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasList {
    head: PackageKey,
    tail: Vec<PackageKey>,
}

impl AliasList {
    pub fn new(mut aliases: Vec<PackageKey>) -> Option<Self> {
        if aliases.is_empty() {
            return None;
        }
        let head = aliases.remove(0);
        Some(Self { head, tail: aliases })
    }

    /// The canonical representative used to name the entry's graph node.
    pub fn first(&self) -> &PackageKey {
        &self.head
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageKey> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    /// Exact resolved version, never a range.
    pub version: String,
    pub remote: RemoteDescriptor,
    pub children: Vec<PackageKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockGroup {
    pub aliases: AliasList,
    pub entry: LockEntry,
}

#[derive(Debug, Clone)]
pub struct Lockfile {
    pub kind: LockfileKind,
    pub groups: Vec<LockGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: Option<usize>,
    pub message: String,
}

impl ParseError {
    pub(crate) fn at(line: usize, message: impl Into<String>) -> Self {
        Self { line: Some(line), message: message.into() }
    }

    pub(crate) fn general(message: impl Into<String>) -> Self {
        Self { line: None, message: message.into() }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse lockfile text, picking the dialect from its contents.
pub fn parse(text: &str) -> std::result::Result<Lockfile, ParseError> {
    if berry::is_berry(text) {
        berry::parse(text)
    } else {
        v1::parse(text)
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })
}

/// Parse text that was read from `path`, attaching the path to any failure.
pub fn parse_file(path: &Path, text: &str) -> Result<Lockfile> {
    parse(text).map_err(|e| Error::Parse { path: path.to_path_buf(), message: e.to_string() })
}

pub fn load(path: &Path) -> Result<Lockfile> {
    let text = read_text(path)?;
    parse_file(path, &text)
}
