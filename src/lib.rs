//! Dependency audit for Python sources: collect files per selector,
//! extract import declarations, classify against a version-specific
//! stdlib catalog, and report usage per selector.

pub mod aggregate;
pub mod cli;
pub mod collect;
pub mod extract;
pub mod model;
pub mod report;
pub mod stdlib;
