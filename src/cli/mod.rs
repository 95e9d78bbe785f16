pub mod args;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use rayon::prelude::*;
use serde_json::json;

pub use args::Cli;

use crate::config::{Config, ConfigOverrides};
use crate::services::Orchestrator;

const REPORT_TEMPLATE: &str = include_str!("../../templates/report.hbs");

/// Runs the CLI end to end and returns the process exit code (spec §6:
/// `0` on success, `1` on parse/analysis failure; failure in any file
/// fails the whole run). Files are analyzed concurrently: each gets
/// its own `Orchestrator` (spec §5 "Multiple concurrent inputs MAY be
/// processed by independent Orchestrator instances"), so there is no
/// shared cache or AST across the batch.
pub fn run(cli: Cli) -> Result<i32> {
    let overrides = ConfigOverrides {
        tree_depth_bound: cli.tree_depth_bound,
        confidence_floor: cli.confidence_floor,
        ..Default::default()
    };
    let config = Config::load(overrides);

    let outcomes: Vec<Result<()>> = cli
        .files
        .par_iter()
        .map(|path| analyze_one(path, cli.function.as_deref(), &config, cli.json))
        .collect();

    let mut failed = false;
    for outcome in outcomes {
        match outcome {
            Ok(()) => {}
            Err(err) => {
                eprintln!("{err:#}");
                failed = true;
            }
        }
    }

    Ok(if failed { 1 } else { 0 })
}

fn analyze_one(path: &std::path::Path, function: Option<&str>, config: &Config, json: bool) -> Result<()> {
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let orchestrator = Orchestrator::new(config.clone());

    let hint = function
        .map(str::to_string)
        .unwrap_or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default());
    let result = orchestrator.process_code(&source, &hint);

    if json {
        println!("{}", serde_json::to_string_pretty(&*result)?);
    } else {
        let mut hb = Handlebars::new();
        hb.register_template_string("report", REPORT_TEMPLATE)?;
        let rendered = hb.render("report", &json!(&*result))?;
        println!("{rendered}");
    }

    if let Some(error) = &result.error {
        anyhow::bail!("{}: {error}", path.display());
    }
    Ok(())
}
