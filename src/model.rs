use anyhow::{Result, bail};
use std::fmt;

/// A dotted import target, e.g. `os.path` as `["os", "path"]`.
///
/// Segments are non-empty and dot-free; ordering is lexicographic over
/// segments, which matches ordering over the dotted rendering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    pub fn new(segments: Vec<String>) -> Result<Self> {
        if segments.is_empty() {
            bail!("empty module path");
        }
        for segment in &segments {
            if segment.is_empty() || segment.contains('.') {
                bail!("bad module path segment: {segment:?}");
            }
        }
        Ok(Self(segments))
    }

    /// Splits a dotted name on `.`, dropping empty segments. Returns `None`
    /// when nothing remains (e.g. a bare relative prefix).
    pub fn from_dotted(raw: &str) -> Option<Self> {
        let segments: Vec<String> = raw
            .split('.')
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The top-level package as a single-segment path.
    pub fn head(&self) -> ModulePath {
        Self(vec![self.0[0].clone()])
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn join(&self, segment: &str) -> Result<ModulePath> {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self::new(segments)
    }

    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
