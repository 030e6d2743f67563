use super::{identity_of, AliasIndex, DependencyGraph, Environment, GraphBuilder, Label, Warning};
use crate::lockfile::{LockGroup, Lockfile};
use crate::manifest::RootSets;
use crate::package::PackageKey;

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    pub warnings: Vec<Warning>,
}

/// Build the dependency graph for `lockfile`.
///
/// `source` names the graph being built (normally the lockfile path) and is
/// carried on every warning. An unresolvable child reference only drops that
/// one edge; this function cannot fail.
pub fn build(lockfile: &Lockfile, roots: &RootSets, source: &str) -> BuildOutcome {
    let (index, mut warnings) = AliasIndex::build(&lockfile.groups, source);
    let mut builder = GraphBuilder::new();

    for group in &lockfile.groups {
        visit(group, &index, roots, source, &mut builder, &mut warnings);
    }

    let graph = builder.finish();
    tracing::debug!(
        %source,
        nodes = graph.node_count(),
        warnings = warnings.len(),
        "built dependency graph"
    );
    BuildOutcome { graph, warnings }
}

fn visit(
    group: &LockGroup,
    index: &AliasIndex<'_>,
    roots: &RootSets,
    source: &str,
    builder: &mut GraphBuilder,
    warnings: &mut Vec<Warning>,
) {
    let parent = identity_of(group);
    builder.add_node(&parent);

    for location in group.entry.remote.locations() {
        builder.add_label(&parent, Label::Location(location));
    }

    for spec in &group.entry.children {
        match index.lookup(spec) {
            Some(child) => builder.add_edge(&parent, &identity_of(child)),
            None => {
                tracing::warn!(%source, %parent, %spec, "skipping unresolved dependency");
                warnings.push(Warning::UnresolvedChild {
                    source: source.to_string(),
                    parent: parent.clone(),
                    spec: spec.clone(),
                });
            }
        }
    }

    let resolved = PackageKey::new(&parent.name, &group.entry.version);
    let declared_in = |set: &std::collections::BTreeSet<PackageKey>| {
        set.contains(&resolved) || group.aliases.iter().any(|alias| set.contains(alias))
    };
    if declared_in(&roots.production) {
        builder.mark_direct(&parent);
        builder.add_label(&parent, Label::Environment(Environment::Production));
    }
    if declared_in(&roots.development) {
        builder.mark_direct(&parent);
        builder.add_label(&parent, Label::Environment(Environment::Development));
    }
}
