//! Locating lockfiles and running the graph build for each project.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::{self, BuildOutcome};
use crate::lockfile::{self, Lockfile};
use crate::manifest;
use crate::report::{EdgeRecord, ProjectReport, SourceInfo};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const LOCKFILE_NAME: &str = "yarn.lock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory holding `package.json`.
    pub root: PathBuf,
    pub lockfile: PathBuf,
}

impl Project {
    pub fn in_dir(dir: &Path) -> Self {
        Self { root: dir.to_path_buf(), lockfile: dir.join(LOCKFILE_NAME) }
    }

    pub fn from_lockfile(path: &Path) -> Self {
        let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Self { root, lockfile: path.to_path_buf() }
    }
}

/// Projects to scan under `path`. A file path is taken as the lockfile itself;
/// a directory is the project root, or with `recursive` the top of a tree
/// searched for `yarn.lock` files.
pub fn discover(path: &Path, recursive: bool, config: &Config) -> Result<Vec<Project>> {
    if path.is_file() {
        return Ok(vec![Project::from_lockfile(path)]);
    }
    if !recursive {
        return Ok(vec![Project::in_dir(path)]);
    }

    let mut projects = Vec::new();
    let walker = WalkDir::new(path).follow_links(false).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !config.skip_dirs.iter().any(|skip| entry.file_name() == skip.as_str())
    });
    for entry in walker {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_file() && entry.file_name() == LOCKFILE_NAME {
            projects.push(Project::from_lockfile(entry.path()));
        }
    }
    projects.sort_by(|a, b| a.lockfile.cmp(&b.lockfile));
    tracing::debug!(root = %path.display(), found = projects.len(), "discovered lockfiles");
    Ok(projects)
}

/// Parsed lockfile plus the graph built from it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub lockfile: Lockfile,
    pub sha256: String,
    pub outcome: BuildOutcome,
}

/// Read and parse the project's lockfile and build its graph. Read and parse
/// failures are fatal for this project.
pub fn build_project(project: &Project) -> Result<Analysis> {
    let text = lockfile::read_text(&project.lockfile)?;
    let sha256 = hex::encode(Sha256::digest(text.as_bytes()));
    let lock = lockfile::parse_file(&project.lockfile, &text)?;
    drop(text);

    let roots = manifest::load_root_sets(&project.root)?.normalized_for(lock.kind);
    let source = project.lockfile.display().to_string();
    tracing::debug!(%source, kind = %lock.kind, entries = lock.groups.len(), "parsed lockfile");
    let outcome = graph::build(&lock, &roots, &source);
    Ok(Analysis { lockfile: lock, sha256, outcome })
}

pub fn analyze(project: &Project, config: &Config) -> Result<ProjectReport> {
    let analysis = build_project(project)?;
    let graph = &analysis.outcome.graph;
    let dependencies = graph::materialize(graph, config.default_environment);
    let edges = graph
        .edges()
        .map(|(from, to)| EdgeRecord { from: from.clone(), to: to.clone() })
        .collect();
    Ok(ProjectReport {
        source: SourceInfo {
            lockfile: project.lockfile.display().to_string(),
            kind: analysis.lockfile.kind,
            sha256: analysis.sha256,
        },
        dependencies,
        edges,
        warnings: analysis.outcome.warnings,
    })
}

#[derive(Debug)]
pub struct ProjectResult {
    pub project: Project,
    pub result: Result<ProjectReport>,
}

/// Analyze independent projects in parallel. Each project gets its own
/// builder and its own result; one failure does not affect the others.
pub fn analyze_all(projects: &[Project], config: &Config) -> Vec<ProjectResult> {
    projects
        .par_iter()
        .map(|project| ProjectResult { project: project.clone(), result: analyze(project, config) })
        .collect()
}
