use crate::lockfile::{AliasList, LockEntry, LockGroup, Lockfile, LockfileKind, RemoteDescriptor};
use crate::manifest::RootSets;
use crate::package::PackageKey;
use std::fs;
use std::path::Path;

pub const SCENARIO_LOCK: &str = r##"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


a@^1.0.0:
  version "1.0.0"
  resolved "https://registry.yarnpkg.com/a/-/a-1.0.0.tgz#0f3c1e4b"
  dependencies:
    b "^2.0.0"

b@^2.0.0:
  version "2.0.0"
  resolved "https://registry.yarnpkg.com/b/-/b-2.0.0.tgz#8e21d1a2"
"##;

/// Build a group from `name@spec` aliases with no remote.
pub fn group(aliases: &[&str], version: &str, children: &[&str]) -> LockGroup {
    let aliases = AliasList::new(aliases.iter().map(|a| PackageKey::parse(a)).collect())
        .expect("fixture groups need at least one alias");
    LockGroup {
        aliases,
        entry: LockEntry {
            version: version.to_string(),
            remote: RemoteDescriptor::Other,
            children: children.iter().map(|c| PackageKey::parse(c)).collect(),
        },
    }
}

pub fn lockfile_of(groups: Vec<LockGroup>) -> Lockfile {
    Lockfile { kind: LockfileKind::YarnV1, groups }
}

pub fn roots(production: &[&str], development: &[&str]) -> RootSets {
    RootSets {
        production: production.iter().map(|k| PackageKey::parse(k)).collect(),
        development: development.iter().map(|k| PackageKey::parse(k)).collect(),
    }
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture parent");
    }
    fs::write(path, contents).expect("write fixture");
}
