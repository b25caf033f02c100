use anyhow::{Context, Result};
use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Recognized Python source suffix.
pub const SOURCE_SUFFIX: &str = ".py";

/// One exclusion pattern, compiled once at startup.
///
/// A candidate path is excluded when the raw pattern is a literal prefix of
/// it, or when the pattern full-matches it as a regex. Both readings apply
/// to every rule.
#[derive(Debug)]
pub struct IgnoreRule {
    raw: String,
    pattern: Regex,
}

impl IgnoreRule {
    pub fn compile(raw: &str) -> Result<Self> {
        let pattern = Regex::new(&format!("^(?:{raw})$"))
            .with_context(|| format!("bad ignore pattern {raw:?}"))?;
        Ok(Self {
            raw: raw.to_string(),
            pattern,
        })
    }

    pub fn compile_all(patterns: &[String]) -> Result<Vec<IgnoreRule>> {
        patterns.iter().map(|raw| Self::compile(raw)).collect()
    }

    fn matches(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.raw) || self.pattern.is_match(candidate)
    }
}

fn candidate_str(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    rendered.strip_prefix("./").unwrap_or(&rendered).to_string()
}

/// Suffix and exclusion test applied to every candidate file.
pub fn file_is_ok(path: &Path, rules: &[IgnoreRule]) -> bool {
    let candidate = candidate_str(path);
    candidate.ends_with(SOURCE_SUFFIX) && !rules.iter().any(|rule| rule.matches(&candidate))
}

/// Expands one selector into a lazy stream of source files.
///
/// Glob matches that are files are yielded directly; matches that are
/// directories are walked recursively. Exclusion rules apply to files only
/// and never prune descent, so files under an "ignored" directory are still
/// visited unless each one matches a rule itself.
pub fn collect<'a>(
    selector: &str,
    rules: &'a [IgnoreRule],
) -> Result<impl Iterator<Item = Result<PathBuf>> + 'a> {
    let matches =
        glob::glob(selector).with_context(|| format!("bad glob pattern {selector:?}"))?;
    Ok(matches.flat_map(
        move |entry| -> Box<dyn Iterator<Item = Result<PathBuf>> + 'a> {
            match entry {
                Err(err) => Box::new(std::iter::once(Err(err.into()))),
                Ok(path) if path.is_dir() => Box::new(walk_dir(path, rules)),
                Ok(path) if path.is_file() && file_is_ok(&path, rules) => {
                    Box::new(std::iter::once(Ok(path)))
                }
                Ok(_) => Box::new(std::iter::empty()),
            }
        },
    ))
}

fn walk_dir<'a>(
    dir: PathBuf,
    rules: &'a [IgnoreRule],
) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    // Standard filters off: no gitignore handling, no hidden-file skipping.
    // Sorting keeps the walk order stable within a run.
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();
    walker.filter_map(move |entry| match entry {
        Ok(entry) => {
            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                return None;
            }
            let path = entry.into_path();
            if file_is_ok(&path, rules) {
                Some(Ok(path))
            } else {
                None
            }
        }
        Err(err) => Some(Err(err.into())),
    })
}
