use super::project_for;
use crate::colors::*;
use crate::graph::{DependencyGraph, ResolvedIdentity};
use crate::scan;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub fn cmd_tree(path: PathBuf, depth: Option<usize>) -> Result<()> {
    let project = project_for(&path);
    let analysis = scan::build_project(&project)?;
    let graph = &analysis.outcome.graph;

    let mut roots: Vec<&ResolvedIdentity> = graph.direct_nodes().collect();
    if roots.is_empty() {
        // Without a manifest, start from packages nothing depends on.
        let targets: BTreeSet<&ResolvedIdentity> = graph.edges().map(|(_, to)| to).collect();
        roots = graph.nodes().filter(|id| !targets.contains(id)).collect();
    }

    println!(
        "{C_GRAY}[lockgraph]{C_RESET} {} ({} packages, {} roots)",
        project.lockfile.display(),
        graph.node_count(),
        roots.len()
    );
    let mut expanded = BTreeSet::new();
    for root in roots {
        let mut lines = Vec::new();
        render(graph, root, 0, depth, &mut Vec::new(), &mut expanded, &mut lines);
        for line in lines {
            println!("{line}");
        }
    }
    for warning in &analysis.outcome.warnings {
        println!("{C_GRAY}[lockgraph]{C_RESET} {C_YELLOW}warning{C_RESET} {warning}");
    }
    Ok(())
}

/// Render `id` and its subtree into `out`. A node whose children were already
/// printed elsewhere in the same render is marked `(deduped)` and not
/// descended into again, so output stays linear in the number of edges.
pub(crate) fn render<'a>(
    graph: &'a DependencyGraph,
    id: &'a ResolvedIdentity,
    level: usize,
    max_depth: Option<usize>,
    path: &mut Vec<&'a ResolvedIdentity>,
    expanded: &mut BTreeSet<&'a ResolvedIdentity>,
    out: &mut Vec<String>,
) {
    let indent = "  ".repeat(level);
    if path.contains(&id) {
        out.push(format!("{indent}{C_DIM}{id} (cycle){C_RESET}"));
        return;
    }
    let label = if level == 0 {
        format!("{C_BOLD}{C_CYAN}{id}{C_RESET}")
    } else {
        format!("{indent}{C_DIM}-{C_RESET} {id}")
    };
    if expanded.contains(id) {
        out.push(format!("{label} {C_DIM}(deduped){C_RESET}"));
        return;
    }
    out.push(label);
    if max_depth.is_some_and(|max| level >= max) {
        return;
    }
    expanded.insert(id);
    path.push(id);
    for child in graph.children(id) {
        render(graph, child, level + 1, max_depth, path, expanded, out);
    }
    path.pop();
}
