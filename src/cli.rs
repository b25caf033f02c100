use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pydeps",
    version,
    about = "Report which external module dependencies a set of Python sources uses",
    after_help = r#"Examples:
  pydeps 'src/**/*.py'
  pydeps src tools -v 3.11 --all-deps
  pydeps src -i 'build/' '.*_pb2\.py' --show-globs -m 5
  pydeps src --collect-only
"#
)]
pub struct Args {
    /// Glob patterns or paths selecting the source files to audit.
    #[arg(required = true)]
    pub globs: Vec<String>,

    /// Standard-library version to classify against; defaults to the local
    /// interpreter's major.minor.
    #[arg(long, short = 'v')]
    pub python_version: Option<String>,

    /// Files matching this regex or starting with any of these strings
    /// won't be collected.
    #[arg(long, short = 'i', num_args = 1..)]
    pub ignore: Vec<String>,

    /// Just collect files, do not run the checks.
    #[arg(long)]
    pub collect_only: bool,

    /// Include stdlib dependencies.
    #[arg(long, short = 'a', conflicts_with = "stdlib_only")]
    pub all_deps: bool,

    /// Only output stdlib dependencies.
    #[arg(long, short = 's')]
    pub stdlib_only: bool,

    /// For each dependency, indicate which input globs need it.
    #[arg(long, short = 'g')]
    pub show_globs: bool,

    /// When showing globs per dependency, show at most N to avoid flooding
    /// the output (zero means no limit).
    #[arg(long, short = 'm', default_value_t = 0)]
    pub max_show: usize,

    /// Parsable output.
    #[arg(long, short = 'p')]
    pub porcelain: bool,

    /// Keep subpackages in the dependency list.
    #[arg(long, short = 'k')]
    pub keep_subpackages: bool,
}
