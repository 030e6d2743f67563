use crate::colors::*;
use crate::config::Config;
use crate::graph::DefaultEnvironment;
use crate::report::{self, OutputFormat};
use crate::scan::{self, LOCKFILE_NAME};
use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub recursive: bool,
    pub format: String,
    pub output: Option<PathBuf>,
    pub default_env: Option<DefaultEnvironment>,
    pub strict: bool,
    pub config: Option<PathBuf>,
}

pub fn cmd_analyze(opts: AnalyzeOptions) -> Result<()> {
    let format: OutputFormat = opts.format.parse().map_err(|e: String| anyhow!(e))?;
    let mut config = Config::discover(&opts.path, opts.config.as_deref()).context("load config")?;
    if let Some(env) = opts.default_env {
        config.default_environment = env;
    }
    if opts.strict {
        config.fail_on_warnings = true;
    }

    let projects = scan::discover(&opts.path, opts.recursive, &config)
        .with_context(|| format!("discover lockfiles under {}", opts.path.display()))?;
    if projects.is_empty() {
        bail!("no {LOCKFILE_NAME} found under {}", opts.path.display());
    }

    let total = projects.len();
    let mut reports = Vec::with_capacity(total);
    let mut failed = 0usize;
    for outcome in scan::analyze_all(&projects, &config) {
        match outcome.result {
            Ok(report) => reports.push(report),
            Err(e) if total == 1 => return Err(e.into()),
            Err(e) => {
                failed += 1;
                eprintln!("{C_GRAY}[lockgraph]{C_RESET} {C_RED}error{C_RESET} {e}");
            }
        }
    }

    let rendered = report::render(&reports, format)?;
    match &opts.output {
        Some(path) => {
            std::fs::write(path, &rendered).with_context(|| format!("write {}", path.display()))?;
            eprintln!("{C_GRAY}[lockgraph]{C_RESET} wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();
    if warnings > 0 {
        eprintln!("{C_GRAY}[lockgraph]{C_RESET} {C_YELLOW}warning{C_RESET}: {warnings} unresolved or ambiguous references");
    }
    if failed > 0 {
        bail!("{failed} of {total} projects failed to analyze");
    }
    if config.fail_on_warnings && warnings > 0 {
        bail!("{warnings} warnings recorded in strict mode");
    }
    Ok(())
}
