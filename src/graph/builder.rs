use super::{Label, ResolvedIdentity};
use std::collections::{BTreeMap, BTreeSet};

type Id = ResolvedIdentity;

/// Accumulates graph structure and labels during a single build pass.
///
/// Every operation is idempotent and nothing is ever removed. The builder
/// decides nothing on its own; it records what the resolver tells it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: BTreeSet<Id>,
    edges: BTreeSet<(Id, Id)>,
    direct: BTreeSet<Id>,
    labels: BTreeMap<Id, BTreeSet<Label>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: &Id) {
        if !self.nodes.contains(id) {
            self.nodes.insert(id.clone());
        }
    }

    /// Mark `id` as directly declared. Also adds the node.
    pub fn mark_direct(&mut self, id: &Id) {
        self.add_node(id);
        if !self.direct.contains(id) {
            self.direct.insert(id.clone());
        }
    }

    /// Record a `from -> to` edge. Both ends are added as nodes.
    pub fn add_edge(&mut self, from: &Id, to: &Id) {
        self.add_node(from);
        self.add_node(to);
        self.edges.insert((from.clone(), to.clone()));
    }

    pub fn add_label(&mut self, id: &Id, label: Label) {
        self.add_node(id);
        self.labels.entry(id.clone()).or_default().insert(label);
    }

    pub fn finish(self) -> DependencyGraph {
        DependencyGraph { nodes: self.nodes, edges: self.edges, direct: self.direct, labels: self.labels }
    }
}

/// Frozen result of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeSet<Id>,
    edges: BTreeSet<(Id, Id)>,
    direct: BTreeSet<Id>,
    labels: BTreeMap<Id, BTreeSet<Label>>,
}

impl DependencyGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &Id> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.nodes.contains(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&Id, &Id)> {
        self.edges.iter().map(|(from, to)| (from, to))
    }

    pub fn has_edge(&self, from: &Id, to: &Id) -> bool {
        self.edges.contains(&(from.clone(), to.clone()))
    }

    pub fn children<'a>(&'a self, id: &'a Id) -> impl Iterator<Item = &'a Id> + 'a {
        self.edges.iter().filter(move |(from, _)| from == id).map(|(_, to)| to)
    }

    pub fn is_direct(&self, id: &Id) -> bool {
        self.direct.contains(id)
    }

    pub fn direct_nodes(&self) -> impl Iterator<Item = &Id> {
        self.direct.iter()
    }

    pub fn labels(&self, id: &Id) -> Option<&BTreeSet<Label>> {
        self.labels.get(id)
    }
}
