pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod graph;
pub mod lockfile;
pub mod logging;
pub mod manifest;
pub mod package;
pub mod report;
pub mod scan;
#[cfg(test)]
pub mod tests;
