use anyhow::Result;
use clap::Parser;
use pydeps::{aggregate, cli, collect, report, stdlib};
use std::io::Write;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let requested = args
        .python_version
        .clone()
        .unwrap_or_else(stdlib::default_version);
    let version = stdlib::normalize_version(&requested);

    // Version validity is checked before any file work, including the
    // --collect-only path.
    let Some(catalog) = stdlib::catalog_for(&version) else {
        writeln!(
            out,
            "Given python version {version} is not a valid value. Please provide one of {} (default is {}).",
            stdlib::KNOWN_VERSIONS.join(", "),
            stdlib::default_version()
        )?;
        std::process::exit(1);
    };

    let rules = collect::IgnoreRule::compile_all(&args.ignore)?;

    if args.collect_only {
        let mut files = Vec::new();
        for glob in &args.globs {
            for file in collect::collect(glob, &rules)? {
                files.push(file?);
            }
        }
        report::render_collected(&mut out, &files)?;
        return Ok(());
    }

    let index = aggregate::aggregate(&args.globs, &rules, args.keep_subpackages)?;
    let entries = report::classify(index, &catalog);
    let options = report::RenderOptions {
        filter: report::Filter::from_flags(args.all_deps, args.stdlib_only),
        show_globs: args.show_globs,
        porcelain: args.porcelain,
        max_show: args.max_show,
        total_globs: args.globs.len(),
    };
    report::render(&mut out, &entries, &options)
}
