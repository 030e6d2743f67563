pub mod tree;

mod analyze;
mod ls;

pub(crate) use analyze::{cmd_analyze, AnalyzeOptions};
pub(crate) use ls::cmd_ls;
pub(crate) use tree::cmd_tree;

use crate::scan::Project;
use std::path::Path;

/// The single project addressed by `path` (a directory or a lockfile).
pub(crate) fn project_for(path: &Path) -> Project {
    if path.is_file() {
        Project::from_lockfile(path)
    } else {
        Project::in_dir(path)
    }
}
