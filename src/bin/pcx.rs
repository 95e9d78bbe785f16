use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pcx::cli::{self, Cli};

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_new(cli.tracing_filter())?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(cli.debug).compact())
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    let exit_code = cli::run(cli)?;
    std::process::exit(exit_code);
}
