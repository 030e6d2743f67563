use super::{identity_of, Warning};
use crate::lockfile::LockGroup;
use crate::package::PackageKey;
use std::collections::HashMap;

/// Lookup from every alias a lockfile entry is registered under to that entry.
///
/// Entries stay in the caller's slice; the map only holds indexes into it.
#[derive(Debug)]
pub struct AliasIndex<'a> {
    groups: &'a [LockGroup],
    by_alias: HashMap<&'a PackageKey, usize>,
}

impl<'a> AliasIndex<'a> {
    /// Index `groups`. An alias claimed by two different entries keeps the
    /// later entry and is reported as a [`Warning::AliasCollision`].
    pub fn build(groups: &'a [LockGroup], source: &str) -> (Self, Vec<Warning>) {
        let mut by_alias: HashMap<&'a PackageKey, usize> = HashMap::with_capacity(groups.len());
        let mut warnings = Vec::new();

        for (idx, group) in groups.iter().enumerate() {
            for alias in group.aliases.iter() {
                match by_alias.insert(alias, idx) {
                    Some(prev) if prev != idx => {
                        let warning = Warning::AliasCollision {
                            source: source.to_string(),
                            alias: alias.clone(),
                            kept: identity_of(group),
                            replaced: identity_of(&groups[prev]),
                        };
                        tracing::warn!(%source, %alias, "alias registered by more than one lockfile entry");
                        warnings.push(warning);
                    }
                    _ => {}
                }
            }
        }

        (Self { groups, by_alias }, warnings)
    }

    pub fn lookup(&self, key: &PackageKey) -> Option<&'a LockGroup> {
        self.by_alias.get(key).map(|&idx| &self.groups[idx])
    }
}
