use crate::model::ModulePath;
use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Pulls import declarations out of Python source.
///
/// Every `import a.b` target and every name of a `from a.b import c, d`
/// statement becomes one [`ModulePath`], in document order. Imports nested
/// inside functions and classes count too.
pub struct ImportExtractor {
    parser: Parser,
}

impl ImportExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::LANGUAGE;
        parser.set_language(&language.into())?;
        Ok(Self { parser })
    }

    pub fn extract_file(&mut self, path: &Path) -> Result<Vec<ModulePath>> {
        let source =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        self.extract_source(&source)
            .with_context(|| format!("parse {}", path.display()))
    }

    /// Unparsable source is an error, never skipped: silently dropping a
    /// file would under-report dependencies.
    pub fn extract_source(&mut self, source: &str) -> Result<Vec<ModulePath>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("parser returned no tree"))?;
        let root = tree.root_node();
        if root.has_error() {
            bail!("source contains syntax errors");
        }
        let mut imports = Vec::new();
        visit(root, source, &mut imports)?;
        Ok(imports)
    }
}

fn visit(node: Node<'_>, source: &str, out: &mut Vec<ModulePath>) -> Result<()> {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some(path) = ModulePath::from_dotted(&import_target(name, source)) {
                    out.push(path);
                }
            }
            return Ok(());
        }
        "import_from_statement" => {
            let base = from_import_base(node, source);
            return push_from_names(node, base.as_ref(), source, out);
        }
        // `from __future__ import x` is its own node kind in the grammar.
        "future_import_statement" => {
            let base = ModulePath::from_dotted("__future__");
            return push_from_names(node, base.as_ref(), source, out);
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child, source, out)?;
    }
    Ok(())
}

/// The dotted target of one import entry, alias dropped.
fn import_target(node: Node<'_>, source: &str) -> String {
    let target = if node.kind() == "aliased_import" {
        node.child_by_field_name("name").unwrap_or(node)
    } else {
        node
    };
    node_text(target, source)
}

/// Base path of a from-import. Relative imports keep only the named part:
/// `from .pkg import x` has base `pkg`, `from . import x` has no base.
fn from_import_base(node: Node<'_>, source: &str) -> Option<ModulePath> {
    let module = node.child_by_field_name("module_name")?;
    match module.kind() {
        "dotted_name" => ModulePath::from_dotted(&node_text(module, source)),
        "relative_import" => {
            let mut cursor = module.walk();
            module
                .named_children(&mut cursor)
                .find(|child| child.kind() == "dotted_name")
                .and_then(|dotted| ModulePath::from_dotted(&node_text(dotted, source)))
        }
        _ => None,
    }
}

fn push_from_names(
    node: Node<'_>,
    base: Option<&ModulePath>,
    source: &str,
    out: &mut Vec<ModulePath>,
) -> Result<()> {
    if has_wildcard(node) {
        // `from X import *` yields X alone; a bare `from . import *` has
        // nothing to yield.
        if let Some(base) = base {
            out.push(base.clone());
        }
        return Ok(());
    }
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        let name = import_target(name_node, source);
        if name.contains('.') {
            // The grammar promises single-segment names here; a dot means
            // the parser and this walker disagree.
            bail!("dotted name {name:?} in the import clause of a from-import");
        }
        let path = match base {
            Some(base) => base.join(&name)?,
            None => ModulePath::new(vec![name])?,
        };
        out.push(path);
    }
    Ok(())
}

fn has_wildcard(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import")
}

fn node_text(node: Node<'_>, source: &str) -> String {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or("")
        .trim()
        .to_string()
}
