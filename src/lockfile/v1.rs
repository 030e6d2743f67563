use super::{AliasList, LockEntry, LockGroup, Lockfile, LockfileKind, ParseError, RemoteDescriptor};
use crate::package::PackageKey;

type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy)]
enum Block {
    Children,
    Ignored,
}

#[derive(Debug)]
struct PendingEntry {
    header_line: usize,
    aliases: AliasList,
    version: Option<String>,
    resolved: Option<String>,
    integrity: Option<String>,
    children: Vec<PackageKey>,
}

impl PendingEntry {
    fn set(&mut self, key: &str, value: String) {
        match key {
            "version" => self.version = Some(value),
            "resolved" => self.resolved = Some(value),
            "integrity" => self.integrity = Some(value),
            _ => {}
        }
    }

    fn finish(self) -> ParseResult<LockGroup> {
        let version = self.version.filter(|v| !v.is_empty()).ok_or_else(|| {
            ParseError::at(self.header_line, format!("entry {} has no version", self.aliases.first()))
        })?;
        let remote = RemoteDescriptor::from_v1(
            self.resolved.as_deref(),
            self.integrity.as_deref(),
            &self.aliases.first().spec,
        );
        Ok(LockGroup { aliases: self.aliases, entry: LockEntry { version, remote, children: self.children } })
    }
}

pub(super) fn parse(text: &str) -> ParseResult<Lockfile> {
    let mut groups = Vec::new();
    let mut current: Option<PendingEntry> = None;
    let mut block: Option<Block> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        let content = line.trim_start();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let indent = line.len() - content.len();

        if indent == 0 {
            if let Some(pending) = current.take() {
                groups.push(pending.finish()?);
            }
            let header = content
                .strip_suffix(':')
                .ok_or_else(|| ParseError::at(line_no, "expected an entry header ending with ':'"))?;
            let aliases = parse_header(header, line_no)?;
            current = Some(PendingEntry {
                header_line: line_no,
                aliases,
                version: None,
                resolved: None,
                integrity: None,
                children: Vec::new(),
            });
            block = None;
            continue;
        }

        let entry = current
            .as_mut()
            .ok_or_else(|| ParseError::at(line_no, "field outside of an entry"))?;

        if indent == 2 {
            if let Some(name) = content.strip_suffix(':') {
                let (key, _) = next_token(name, line_no, char::is_whitespace)?;
                block = Some(match key.as_str() {
                    "dependencies" | "optionalDependencies" => Block::Children,
                    _ => Block::Ignored,
                });
            } else {
                block = None;
                let (key, value) = split_pair(content, line_no)?;
                entry.set(&key, value);
            }
            continue;
        }

        match (block, indent) {
            (Some(Block::Children), 4) => {
                let (name, spec) = split_pair(content, line_no)?;
                entry.children.push(PackageKey::new(&name, &spec));
            }
            (Some(Block::Ignored), i) if i >= 4 => {}
            (None, _) => {
                return Err(ParseError::at(line_no, "nested value without an enclosing field"));
            }
            _ => {
                return Err(ParseError::at(line_no, format!("unexpected indentation of {indent} spaces")));
            }
        }
    }

    if let Some(pending) = current.take() {
        groups.push(pending.finish()?);
    }
    Ok(Lockfile { kind: LockfileKind::YarnV1, groups })
}

fn parse_header(header: &str, line: usize) -> ParseResult<AliasList> {
    let mut aliases = Vec::new();
    let mut rest = header;
    loop {
        let (token, tail) = next_token(rest, line, |c| c == ',')?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ParseError::at(line, "empty alias in entry header"));
        }
        aliases.push(PackageKey::parse(token));
        let tail = tail.trim_start();
        if tail.is_empty() {
            break;
        }
        rest = tail
            .strip_prefix(',')
            .ok_or_else(|| ParseError::at(line, format!("unexpected text after alias: {tail}")))?;
    }
    AliasList::new(aliases).ok_or_else(|| ParseError::at(line, "entry header lists no aliases"))
}

/// Split `key value`, where either side may be a quoted string.
fn split_pair(content: &str, line: usize) -> ParseResult<(String, String)> {
    let (key, rest) = next_token(content, line, char::is_whitespace)?;
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ParseError::at(line, format!("field '{key}' has no value")));
    }
    let (value, tail) = next_token(rest, line, |_| false)?;
    if !tail.trim().is_empty() {
        return Err(ParseError::at(line, format!("unexpected text after value of '{key}'")));
    }
    Ok((key, value))
}

/// Read one token: a JSON-style quoted string, or bare text up to `stop`.
fn next_token(input: &str, line: usize, stop: impl Fn(char) -> bool) -> ParseResult<(String, &str)> {
    let input = input.trim_start();
    if !input.starts_with('"') {
        let end = input.find(stop).unwrap_or(input.len());
        return Ok((input[..end].trim_end().to_string(), &input[end..]));
    }

    let mut escaped = false;
    let mut close = None;
    for (i, b) in input.bytes().enumerate().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => {
                close = Some(i);
                break;
            }
            _ => {}
        }
    }
    let close = close.ok_or_else(|| ParseError::at(line, "unterminated quoted string"))?;
    let token: String = serde_json::from_str(&input[..=close])
        .map_err(|e| ParseError::at(line, format!("invalid quoted string: {e}")))?;
    Ok((token, &input[close + 1..]))
}
