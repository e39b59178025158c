use anyhow::Result;
use clap::Parser;

use poweralert::cli::{Cli, Commands};
use poweralert::config::Settings;
use poweralert::{logging, runtime};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command {
        Commands::Show { view, date, detail } => runtime::run_show(settings, view, date, detail).await,
        Commands::Watch { view } => runtime::run_watch(settings, view).await,
    }
}
