use super::{DependencyGraph, Environment, Label, ResolvedIdentity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Finished record for one graph node, in the shape sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub locations: Vec<String>,
    pub environments: BTreeSet<Environment>,
    pub direct: bool,
}

/// What a dependency with no environment label ends up with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultEnvironment {
    /// Leave the set empty.
    #[default]
    None,
    Production,
    Development,
    /// Union of the environments of every direct dependency that reaches it.
    Inherit,
}

impl FromStr for DefaultEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(DefaultEnvironment::None),
            "production" | "prod" => Ok(DefaultEnvironment::Production),
            "development" | "dev" => Ok(DefaultEnvironment::Development),
            "inherit" => Ok(DefaultEnvironment::Inherit),
            other => Err(format!(
                "unknown default environment '{other}', use none, production, development or inherit"
            )),
        }
    }
}

impl fmt::Display for DefaultEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefaultEnvironment::None => "none",
            DefaultEnvironment::Production => "production",
            DefaultEnvironment::Development => "development",
            DefaultEnvironment::Inherit => "inherit",
        };
        f.write_str(name)
    }
}

/// Fold every node's labels into a [`Dependency`], then fill empty
/// environment sets according to `policy`. Output is sorted by name and
/// version.
pub fn materialize(graph: &DependencyGraph, policy: DefaultEnvironment) -> Vec<Dependency> {
    let mut deps: Vec<Dependency> = graph
        .nodes()
        .map(|id| {
            let start = Dependency {
                name: id.name.clone(),
                version: id.version.clone(),
                locations: Vec::new(),
                environments: BTreeSet::new(),
                direct: graph.is_direct(id),
            };
            graph.labels(id).into_iter().flatten().fold(start, apply_label)
        })
        .collect();

    match policy {
        DefaultEnvironment::None => {}
        DefaultEnvironment::Production => fill_empty(&mut deps, |_| [Environment::Production].into()),
        DefaultEnvironment::Development => fill_empty(&mut deps, |_| [Environment::Development].into()),
        DefaultEnvironment::Inherit => {
            let inherited = inherited_environments(graph);
            fill_empty(&mut deps, |dep| {
                let id = ResolvedIdentity::new(dep.name.clone(), dep.version.clone());
                inherited.get(&id).cloned().unwrap_or_default()
            });
        }
    }
    deps
}

fn apply_label(mut dep: Dependency, label: &Label) -> Dependency {
    match label {
        Label::Location(location) => dep.locations.push(location.clone()),
        Label::Environment(env) => {
            dep.environments.insert(*env);
        }
    }
    dep
}

fn fill_empty(deps: &mut [Dependency], default: impl Fn(&Dependency) -> BTreeSet<Environment>) {
    for dep in deps.iter_mut().filter(|d| d.environments.is_empty()) {
        dep.environments = default(dep);
    }
}

fn own_environments(graph: &DependencyGraph, id: &ResolvedIdentity) -> BTreeSet<Environment> {
    graph
        .labels(id)
        .into_iter()
        .flatten()
        .filter_map(|label| match label {
            Label::Environment(env) => Some(*env),
            Label::Location(_) => None,
        })
        .collect()
}

/// Walk down from each direct node, handing its environments to everything
/// it reaches.
fn inherited_environments(graph: &DependencyGraph) -> BTreeMap<ResolvedIdentity, BTreeSet<Environment>> {
    let mut adjacency: BTreeMap<&ResolvedIdentity, Vec<&ResolvedIdentity>> = BTreeMap::new();
    for (from, to) in graph.edges() {
        adjacency.entry(from).or_default().push(to);
    }

    let mut inherited: BTreeMap<ResolvedIdentity, BTreeSet<Environment>> = BTreeMap::new();
    for root in graph.direct_nodes() {
        let envs = own_environments(graph, root);
        if envs.is_empty() {
            continue;
        }
        let mut seen: BTreeSet<&ResolvedIdentity> = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            inherited.entry(id.clone()).or_default().extend(envs.iter().copied());
            if let Some(children) = adjacency.get(id) {
                stack.extend(children.iter().copied());
            }
        }
    }
    inherited
}
