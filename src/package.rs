use serde::{Serialize, Serializer};
use std::fmt;

/// Declared package name, either `name` or `@scope/name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageName {
    Simple(String),
    Scoped { scope: String, name: String },
}

impl PackageName {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            if let Some((scope, name)) = rest.split_once('/') {
                if !scope.is_empty() && !name.is_empty() {
                    return PackageName::Scoped { scope: scope.to_string(), name: name.to_string() };
                }
            }
        }
        PackageName::Simple(trimmed.to_string())
    }

    pub fn full_name(&self) -> String {
        match self {
            PackageName::Simple(name) => name.clone(),
            PackageName::Scoped { scope, name } => format!("@{scope}/{name}"),
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageName::Simple(name) => f.write_str(name),
            PackageName::Scoped { scope, name } => write!(f, "@{scope}/{name}"),
        }
    }
}

/// A package as it is requested: a name plus the version spec that asked for it.
///
/// Two keys that resolve to the same lockfile entry are still distinct keys;
/// that is what makes them aliases.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageKey {
    pub name: PackageName,
    pub spec: String,
}

impl PackageKey {
    pub fn new(name: &str, spec: &str) -> Self {
        Self { name: PackageName::parse(name), spec: spec.trim().to_string() }
    }

    /// Parse `name@spec`. The split happens at the first `@` after the scope
    /// marker, so protocol specs that contain their own `@`
    /// (`wrap@npm:string-width@^4`) keep it.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let search_from = usize::from(trimmed.starts_with('@'));
        match trimmed[search_from..].find('@') {
            Some(idx) => {
                let at = search_from + idx;
                Self::new(&trimmed[..at], &trimmed[at + 1..])
            }
            None => Self::new(trimmed, ""),
        }
    }

    pub fn full_name(&self) -> String {
        self.name.full_name()
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.spec.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}@{}", self.name, self.spec)
        }
    }
}

impl Serialize for PackageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
