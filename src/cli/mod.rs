use crate::graph::DefaultEnvironment;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "lockgraph",
    version,
    about = "Build labeled dependency graphs from Yarn lockfiles",
    long_about = "lockgraph turns a yarn.lock (classic or berry) plus package.json into a dependency graph\nwith direct/transitive flags, environments and source locations.\n\nExamples:\n  lockgraph analyze\n  lockgraph analyze ./web --format yaml --output deps.yaml\n  lockgraph analyze . --recursive --default-env inherit\n  lockgraph tree --depth 2\n  lockgraph ls"
)]
pub struct LockgraphCli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub(crate) verbose: bool,
    /// Config file (defaults to lockgraph.yml in the scanned directory)
    #[arg(long, short = 'c', global = true)]
    pub(crate) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dependency graph and print the report
    Analyze {
        /// Project directory or lockfile path
        path: Option<PathBuf>,
        /// Search the directory tree for every yarn.lock
        #[arg(long, short = 'r')]
        recursive: bool,
        /// Output format: json, yaml or text
        #[arg(long, short = 'f', default_value = "json")]
        format: String,
        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Environment for dependencies no manifest section claims: none, production, development, inherit
        #[arg(long = "default-env")]
        default_env: Option<DefaultEnvironment>,
        /// Fail when any warning was recorded
        #[arg(long)]
        strict: bool,
    },
    /// Print direct dependencies and what they pull in
    Tree {
        path: Option<PathBuf>,
        /// Maximum depth below each direct dependency
        #[arg(long, short = 'd')]
        depth: Option<usize>,
    },
    /// List lockfile entries
    #[command(alias = "list")]
    Ls { path: Option<PathBuf> },
}

impl LockgraphCli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn run(&self) -> Result<()> {
        crate::logging::init(self.verbose);
        let here = || PathBuf::from(".");
        match &self.command {
            None => {
                self.print_help();
                Ok(())
            }
            Some(Commands::Analyze { path, recursive, format, output, default_env, strict }) => {
                commands::cmd_analyze(commands::AnalyzeOptions {
                    path: path.clone().unwrap_or_else(here),
                    recursive: *recursive,
                    format: format.clone(),
                    output: output.clone(),
                    default_env: *default_env,
                    strict: *strict,
                    config: self.config.clone(),
                })
            }
            Some(Commands::Tree { path, depth }) => {
                commands::cmd_tree(path.clone().unwrap_or_else(here), *depth)
            }
            Some(Commands::Ls { path }) => commands::cmd_ls(path.clone().unwrap_or_else(here)),
        }
    }

    fn print_help(&self) {
        println!("lockgraph - dependency graphs from Yarn lockfiles\n");
        println!(
            "Commands:\n  analyze [path] [--recursive] [--format json|yaml|text] [--output file] [--default-env env] [--strict]\n  tree [path] [--depth n]\n  ls [path]"
        );
    }
}
