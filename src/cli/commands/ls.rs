use super::project_for;
use crate::colors::*;
use crate::lockfile;
use anyhow::Result;
use std::path::PathBuf;

pub fn cmd_ls(path: PathBuf) -> Result<()> {
    let project = project_for(&path);
    if !project.lockfile.exists() {
        println!(
            "{C_GRAY}[lockgraph]{C_RESET} {C_RED}error{C_RESET} no lockfile at {}",
            project.lockfile.display()
        );
        return Ok(());
    }
    let lock = lockfile::load(&project.lockfile)?;

    println!(
        "{gray}[lockgraph]{reset} {kind} lockfile ({count} entries):",
        gray = C_GRAY,
        reset = C_RESET,
        kind = lock.kind,
        count = lock.groups.len()
    );
    for group in &lock.groups {
        println!(
            "{gray}[lockgraph]{reset}  {dim}-{reset} {name} => {version} {dim}({aliases} aliases, {children} deps){reset}",
            gray = C_GRAY,
            dim = C_DIM,
            reset = C_RESET,
            name = group.aliases.first().full_name(),
            version = group.entry.version,
            aliases = group.aliases.iter().count(),
            children = group.entry.children.len()
        );
    }
    Ok(())
}
