//! CLI argument surface (spec §6 "CLI / embedding").
//!
//! A thin adapter over [`crate::services::Orchestrator::process_code`]:
//! reads a pseudocode file, prints a report, exits `0` on success and
//! `1` on parse/analysis failure. Verbosity flags follow the teacher's
//! `--verbose`/`--debug`/`--trace` precedence (`cli::mod::Cli` in the
//! teacher repo), generalized here to this crate's single-command shape.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pcx",
    about = "Static asymptotic complexity analyzer for a pseudocode dialect",
    version
)]
pub struct Cli {
    /// Paths to pseudocode source files. Multiple files are analyzed
    /// concurrently, one Orchestrator instance per file (spec §5: no
    /// AST or cache is shared across independent analyses).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Name of the function to analyze; defaults to the last function
    /// declared in the file.
    #[arg(long)]
    pub function: Option<String>,

    /// Emit the report as JSON instead of a pretty-printed report.
    #[arg(long)]
    pub json: bool,

    /// Recurrence-tree depth bound, overriding config/env/defaults.
    #[arg(long)]
    pub tree_depth_bound: Option<u32>,

    /// Minimum confidence percentage before a bound is downgraded to O(?).
    #[arg(long)]
    pub confidence_floor: Option<u8>,

    /// Enable verbose (info-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Custom tracing filter, overrides --verbose/--debug.
    #[arg(long, global = true, env = "RUST_LOG")]
    pub trace_filter: Option<String>,
}

impl Cli {
    pub fn tracing_filter(&self) -> String {
        if let Some(custom) = &self.trace_filter {
            return custom.clone();
        }
        if self.debug {
            "warn,pcx=debug".to_string()
        } else if self.verbose {
            "warn,pcx=info".to_string()
        } else {
            "warn".to_string()
        }
    }
}
