use crate::error::{Error, Result};
use crate::graph::{Dependency, Environment, ResolvedIdentity, Warning};
use crate::lockfile::LockfileKind;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub lockfile: String,
    pub kind: LockfileKind,
    /// Hex SHA-256 of the lockfile bytes.
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub from: ResolvedIdentity,
    pub to: ResolvedIdentity,
}

/// Everything produced for one lockfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub source: SourceInfo,
    pub dependencies: Vec<Dependency>,
    pub edges: Vec<EdgeRecord>,
    pub warnings: Vec<Warning>,
}

impl ProjectReport {
    pub fn direct_count(&self) -> usize {
        self.dependencies.iter().filter(|d| d.direct).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("unsupported format '{other}', use 'json', 'yaml' or 'text'")),
        }
    }
}

/// Render reports. A single report is emitted as an object, several as a list.
pub fn render(reports: &[ProjectReport], format: OutputFormat) -> Result<String> {
    match (format, reports) {
        (OutputFormat::Json, [single]) => to_json(single),
        (OutputFormat::Json, many) => to_json(&many),
        (OutputFormat::Yaml, [single]) => to_yaml(single),
        (OutputFormat::Yaml, many) => to_yaml(&many),
        (OutputFormat::Text, many) => Ok(many.iter().map(render_text).collect::<Vec<_>>().join("\n")),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialize(e.to_string()))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| Error::Serialize(e.to_string()))
}

fn render_text(report: &ProjectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {} packages, {} direct, {} warnings)",
        report.source.lockfile,
        report.source.kind,
        report.dependencies.len(),
        report.direct_count(),
        report.warnings.len()
    );
    for dep in &report.dependencies {
        let kind = if dep.direct { "direct" } else { "deep" };
        let envs: Vec<&str> = dep
            .environments
            .iter()
            .map(|e| match e {
                Environment::Production => "production",
                Environment::Development => "development",
            })
            .collect();
        let _ = write!(out, "  {}@{} [{kind}]", dep.name, dep.version);
        if !envs.is_empty() {
            let _ = write!(out, " {}", envs.join(","));
        }
        for location in &dep.locations {
            let _ = write!(out, " {location}");
        }
        out.push('\n');
    }
    if !report.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &report.warnings {
            let _ = writeln!(out, "  {warning}");
        }
    }
    out
}
