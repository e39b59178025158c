use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::handlers::calendar_view::ViewMode;

#[derive(Parser)]
#[command(name = "poweralert", about = "Utility outage calendar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch outages once and print the calendar.
    Show {
        #[arg(long)]
        view: Option<ViewMode>,
        /// Day the calendar is centered on (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print the full record of one outage after the calendar.
        #[arg(long)]
        detail: Option<String>,
    },
    /// Keep the calendar refreshed until interrupted.
    Watch {
        #[arg(long)]
        view: Option<ViewMode>,
    },
}
