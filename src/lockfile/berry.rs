use super::{AliasList, LockEntry, LockGroup, Lockfile, LockfileKind, ParseError, RemoteDescriptor};
use crate::package::PackageKey;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

const METADATA_KEY: &str = "__metadata";
const ROOT_WORKSPACE: &str = "workspace:.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BerryEntry {
    version: Option<Value>,
    resolution: Option<String>,
    checksum: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, Value>,
}

pub(super) fn is_berry(text: &str) -> bool {
    text.lines().any(|line| line.starts_with(METADATA_KEY))
}

pub(super) fn parse(text: &str) -> Result<Lockfile, ParseError> {
    let document: Mapping = serde_yaml::from_str(text).map_err(|e| match e.location() {
        Some(loc) => ParseError::at(loc.line(), e.to_string()),
        None => ParseError::general(e.to_string()),
    })?;

    let mut groups = Vec::new();
    for (key, value) in document {
        let Some(key) = key.as_str() else {
            return Err(ParseError::general("lockfile keys must be strings"));
        };
        if key == METADATA_KEY {
            continue;
        }
        let entry: BerryEntry = serde_yaml::from_value(value)
            .map_err(|e| ParseError::general(format!("entry '{key}': {e}")))?;
        if let Some(group) = lower_entry(key, entry)? {
            groups.push(group);
        }
    }
    Ok(Lockfile { kind: LockfileKind::YarnBerry, groups })
}

fn lower_entry(key: &str, entry: BerryEntry) -> Result<Option<LockGroup>, ParseError> {
    let aliases: Vec<PackageKey> = key
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(PackageKey::parse)
        .collect();
    let aliases = AliasList::new(aliases)
        .ok_or_else(|| ParseError::general(format!("entry '{key}' lists no descriptors")))?;

    let resolution = entry.resolution.as_deref().map(PackageKey::parse);
    if resolution.as_ref().is_some_and(|r| r.spec == ROOT_WORKSPACE) {
        return Ok(None);
    }

    let version = entry
        .version
        .as_ref()
        .and_then(scalar)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ParseError::general(format!("entry '{key}' has no version")))?;

    let remote = match &resolution {
        Some(res) => RemoteDescriptor::from_berry(&res.spec, entry.checksum.as_deref()),
        None => RemoteDescriptor::Other,
    };

    let mut children = Vec::new();
    for (name, range) in entry.dependencies.iter().chain(entry.optional_dependencies.iter()) {
        let range = scalar(range)
            .ok_or_else(|| ParseError::general(format!("entry '{key}': dependency '{name}' has no range")))?;
        children.push(PackageKey::new(name, &with_protocol(&range)));
    }

    Ok(Some(LockGroup { aliases, entry: LockEntry { version, remote, children } }))
}

/// Header descriptors always carry a protocol, dependency ranges only when it
/// is not the default `npm:`.
pub(super) fn with_protocol(range: &str) -> String {
    if range.contains(':') {
        range.to_string()
    } else {
        format!("npm:{range}")
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
