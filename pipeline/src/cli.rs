//! Command-line surface: `program queue_size stage1 stage2 … stageN`.
//!
//! Grounded on `seis-sim::cli::Cli`'s derive-based layout (doc comments
//! become `--help` text, `#[clap(author, version, about)]` pulls from
//! `Cargo.toml`). Argument and stage-resolution errors are handled by the
//! caller, not here; `clap`'s own parse failures already produce exit
//! code 2 with a usage block on stderr, which this binary's own
//! `ArgError`/`ResolveError` paths (exit 1, usage on stdout) sit
//! alongside for errors `clap` cannot see (e.g. an unresolvable stage
//! name).

use clap::Parser;

/// Compose named stages into a running line-processing pipeline.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Capacity applied to every stage's input queue. Must be at least 1.
    pub queue_size: usize,

    /// Stage names, in the order data should flow through them. At
    /// least one is required.
    #[arg(required = true, trailing_var_arg = true)]
    pub stages: Vec<String>,
}
