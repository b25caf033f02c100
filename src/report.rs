use crate::aggregate::DependencyIndex;
use crate::model::ModulePath;
use crate::stdlib::{self, StdlibCatalog};
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// One reportable dependency with the selectors that need it.
pub struct DepEntry {
    pub path: ModulePath,
    pub selectors: Vec<String>,
    pub stdlib: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Default: report only third-party dependencies.
    ThirdParty,
    All,
    StdlibOnly,
}

impl Filter {
    pub fn from_flags(all_deps: bool, stdlib_only: bool) -> Self {
        if all_deps {
            Filter::All
        } else if stdlib_only {
            Filter::StdlibOnly
        } else {
            Filter::ThirdParty
        }
    }

    fn keeps(self, is_stdlib: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::StdlibOnly => is_stdlib,
            Filter::ThirdParty => !is_stdlib,
        }
    }
}

/// Classifies every index entry against the catalog. Index iteration is
/// sorted, so the output order is deterministic.
pub fn classify(index: DependencyIndex, catalog: &StdlibCatalog) -> Vec<DepEntry> {
    index
        .into_iter()
        .map(|(path, selectors)| {
            let stdlib = stdlib::is_stdlib(&path, catalog);
            DepEntry {
                path,
                selectors: selectors.into_iter().collect(),
                stdlib,
            }
        })
        .collect()
}

pub struct RenderOptions {
    pub filter: Filter,
    pub show_globs: bool,
    pub porcelain: bool,
    /// Cap on selectors listed per dependency; 0 means unlimited.
    pub max_show: usize,
    pub total_globs: usize,
}

pub fn render(out: &mut impl Write, entries: &[DepEntry], opts: &RenderOptions) -> Result<()> {
    for entry in entries.iter().filter(|entry| opts.filter.keeps(entry.stdlib)) {
        let dep = entry.path.dotted();
        let shown = if opts.max_show > 0 && entry.selectors.len() > opts.max_show {
            &entry.selectors[..opts.max_show]
        } else {
            &entry.selectors[..]
        };
        match (opts.show_globs, opts.porcelain) {
            (true, true) => writeln!(out, "{dep} {}", shown.join(" "))?,
            (true, false) => {
                let mode = if entry.selectors.len() <= opts.max_show {
                    "namely"
                } else {
                    "including"
                };
                writeln!(
                    out,
                    "{dep} is needed by {} of the {} input globs, {mode} {}.",
                    entry.selectors.len(),
                    opts.total_globs,
                    shown.join(", ")
                )?;
            }
            (false, true) => writeln!(out, "{dep}")?,
            (false, false) => writeln!(
                out,
                "{dep} is needed by {} of the {} input globs.",
                entry.selectors.len(),
                opts.total_globs
            )?,
        }
    }
    Ok(())
}

pub fn render_collected(out: &mut impl Write, files: &[PathBuf]) -> Result<()> {
    writeln!(out, "Collected {} files:", files.len())?;
    for file in files {
        writeln!(out, "\t{}", file.display())?;
    }
    Ok(())
}
