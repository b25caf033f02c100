use crate::collect::{self, IgnoreRule};
use crate::extract::ImportExtractor;
use crate::model::ModulePath;
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};

/// Dependency path to the set of selectors that require it. BTree keys and
/// sets give sorted, deduplicated iteration for reporting.
pub type DependencyIndex = BTreeMap<ModulePath, BTreeSet<String>>;

/// Runs collection and extraction for every selector and folds the results
/// into one index. Only Collector/Extractor errors can fail this.
pub fn aggregate(
    selectors: &[String],
    rules: &[IgnoreRule],
    keep_subpackages: bool,
) -> Result<DependencyIndex> {
    let mut extractor = ImportExtractor::new()?;
    let mut index = DependencyIndex::new();
    for selector in selectors {
        for file in collect::collect(selector, rules)? {
            let file = file?;
            for path in extractor.extract_file(&file)? {
                index.entry(path).or_default().insert(selector.clone());
            }
        }
    }
    if keep_subpackages {
        Ok(index)
    } else {
        Ok(collapse(index))
    }
}

/// Merges every dependency into its top-level package, unioning selector
/// sets, so `os` and `os.path` report once as `os`.
pub fn collapse(index: DependencyIndex) -> DependencyIndex {
    let mut collapsed = DependencyIndex::new();
    for (path, selectors) in index {
        collapsed.entry(path.head()).or_default().extend(selectors);
    }
    collapsed
}
