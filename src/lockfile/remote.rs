use camino::Utf8PathBuf;

/// Where a locked package is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteDescriptor {
    FileRemote(String),
    FileRemoteNoIntegrity(String),
    GitRemote { url: String, revision: String },
    DirectoryLocal(Utf8PathBuf),
    DirectoryLocalSymlinked(Utf8PathBuf),
    Other,
}

impl RemoteDescriptor {
    /// Location strings recorded on the package's graph node.
    pub fn locations(&self) -> Vec<String> {
        match self {
            RemoteDescriptor::FileRemote(url) | RemoteDescriptor::FileRemoteNoIntegrity(url) => {
                vec![url.clone()]
            }
            RemoteDescriptor::GitRemote { url, revision } if revision.is_empty() => vec![url.clone()],
            RemoteDescriptor::GitRemote { url, revision } => vec![format!("{url}@{revision}")],
            RemoteDescriptor::DirectoryLocal(path)
            | RemoteDescriptor::DirectoryLocalSymlinked(path) => vec![path.to_string()],
            RemoteDescriptor::Other => Vec::new(),
        }
    }

    /// Classify a Yarn classic entry from its `resolved` and `integrity`
    /// fields. Entries without `resolved` fall back to the protocol of the
    /// first alias's spec.
    pub(crate) fn from_v1(resolved: Option<&str>, integrity: Option<&str>, first_spec: &str) -> Self {
        let resolved = resolved.map(str::trim).filter(|r| !r.is_empty());
        let Some(url) = resolved else {
            return from_local_protocol(first_spec);
        };
        if is_git_url(url) {
            let (base, fragment) = split_fragment(url);
            return RemoteDescriptor::GitRemote {
                url: base.to_string(),
                revision: fragment.unwrap_or_default().to_string(),
            };
        }
        if is_http_url(url) {
            let (base, fragment) = split_fragment(url);
            let has_integrity = fragment.is_some_and(|f| !f.is_empty())
                || integrity.is_some_and(|i| !i.trim().is_empty());
            return if has_integrity {
                RemoteDescriptor::FileRemote(base.to_string())
            } else {
                RemoteDescriptor::FileRemoteNoIntegrity(base.to_string())
            };
        }
        RemoteDescriptor::Other
    }

    /// Classify a Yarn modern entry from the spec half of its `resolution`.
    pub(crate) fn from_berry(resolution_spec: &str, checksum: Option<&str>) -> Self {
        let spec = resolution_spec.trim();
        if spec.starts_with("npm:") || spec.starts_with("patch:") {
            return RemoteDescriptor::Other;
        }
        if is_git_url(spec) {
            let (base, fragment) = split_fragment(spec);
            let revision = fragment
                .map(|f| f.strip_prefix("commit=").unwrap_or(f))
                .unwrap_or_default();
            return RemoteDescriptor::GitRemote { url: base.to_string(), revision: revision.to_string() };
        }
        if is_http_url(spec) {
            let (base, _) = split_fragment(spec);
            return match checksum {
                Some(c) if !c.trim().is_empty() => RemoteDescriptor::FileRemote(base.to_string()),
                _ => RemoteDescriptor::FileRemoteNoIntegrity(base.to_string()),
            };
        }
        if let Some(path) = spec.strip_prefix("workspace:") {
            return RemoteDescriptor::DirectoryLocal(Utf8PathBuf::from(path));
        }
        if let Some(path) = spec.strip_prefix("portal:") {
            let (path, _) = split_fragment(path);
            return RemoteDescriptor::DirectoryLocalSymlinked(Utf8PathBuf::from(path));
        }
        match from_local_protocol(spec) {
            RemoteDescriptor::DirectoryLocal(path) => {
                let (path, _) = split_fragment(path.as_str());
                RemoteDescriptor::DirectoryLocal(Utf8PathBuf::from(path))
            }
            RemoteDescriptor::DirectoryLocalSymlinked(path) => {
                let (path, _) = split_fragment(path.as_str());
                RemoteDescriptor::DirectoryLocalSymlinked(Utf8PathBuf::from(path))
            }
            other => other,
        }
    }
}

fn from_local_protocol(spec: &str) -> RemoteDescriptor {
    let spec = spec.trim();
    if let Some(path) = spec.strip_prefix("file:") {
        return RemoteDescriptor::DirectoryLocal(Utf8PathBuf::from(path));
    }
    if let Some(path) = spec.strip_prefix("link:") {
        return RemoteDescriptor::DirectoryLocalSymlinked(Utf8PathBuf::from(path));
    }
    RemoteDescriptor::Other
}

fn split_fragment(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn is_git_url(value: &str) -> bool {
    const PREFIXES: [&str; 5] = ["git+", "git://", "git@", "ssh://", "github:"];
    if PREFIXES.iter().any(|p| value.starts_with(p)) {
        return true;
    }
    let (base, _) = split_fragment(value);
    base.ends_with(".git")
}
