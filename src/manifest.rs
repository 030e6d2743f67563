use crate::error::{Error, Result};
use crate::lockfile::LockfileKind;
use crate::package::PackageKey;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub optional_dependencies: BTreeMap<String, String>,
}

/// Package keys declared directly by the project, split by environment. A
/// package may appear in both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSets {
    pub production: BTreeSet<PackageKey>,
    pub development: BTreeSet<PackageKey>,
}

impl RootSets {
    pub fn is_empty(&self) -> bool {
        self.production.is_empty() && self.development.is_empty()
    }

    /// Add each key in the spec form `kind` uses for its aliases. The
    /// declared keys are kept so exact pins still match the resolved version.
    pub fn normalized_for(self, kind: LockfileKind) -> RootSets {
        let widen = |set: BTreeSet<PackageKey>| -> BTreeSet<PackageKey> {
            let descriptors: Vec<PackageKey> = set
                .iter()
                .map(|key| PackageKey { name: key.name.clone(), spec: kind.descriptor_spec(&key.spec) })
                .collect();
            set.into_iter().chain(descriptors).collect()
        };
        RootSets { production: widen(self.production), development: widen(self.development) }
    }
}

impl Manifest {
    pub fn root_sets(&self) -> RootSets {
        let keys = |deps: &BTreeMap<String, String>| -> Vec<PackageKey> {
            deps.iter().map(|(name, range)| PackageKey::new(name, range)).collect()
        };
        let mut production: BTreeSet<PackageKey> = keys(&self.dependencies).into_iter().collect();
        production.extend(keys(&self.optional_dependencies));
        let development = keys(&self.dev_dependencies).into_iter().collect();
        RootSets { production, development }
    }
}

pub fn load(path: &Path) -> Result<Manifest> {
    let data = fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&data).map_err(|source| Error::Manifest { path: path.to_path_buf(), source })
}

/// Root sets for the project in `dir`. A missing `package.json` yields empty
/// sets, so every node in the graph ends up transitive.
pub fn load_root_sets(dir: &Path) -> Result<RootSets> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        tracing::debug!(dir = %dir.display(), "no package.json; treating all packages as transitive");
        return Ok(RootSets::default());
    }
    Ok(load(&path)?.root_sets())
}
