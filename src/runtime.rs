use std::io::{self, Stdout, Write};
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::clients::outage_client::HttpOutageClient;
use crate::config::Settings;
use crate::handlers::calendar_view::{OutageInteractions, ViewMode};
use crate::handlers::terminal_view::TerminalCalendarView;
use crate::models::calendar_event::OutageDetail;
use crate::tasks::refresh_loop::{RefreshOrchestrator, RefreshState, RefreshTrigger};

type TerminalOrchestrator = RefreshOrchestrator<TerminalCalendarView<Stdout, OutageInteractions>>;

fn build(settings: &Settings, view: ViewMode, focus: Option<NaiveDate>) -> TerminalOrchestrator {
    let fetcher = Arc::new(HttpOutageClient::new(&settings.base_url));
    let mut calendar =
        TerminalCalendarView::new(io::stdout(), OutageInteractions, settings.timezone, view);
    if let Some(date) = focus {
        calendar = calendar.with_focus(date);
    }
    RefreshOrchestrator::new(fetcher, Arc::new(OutageInteractions), calendar)
}

pub async fn run_show(
    settings: Settings,
    view: Option<ViewMode>,
    date: Option<NaiveDate>,
    detail: Option<String>,
) -> Result<()> {
    let orchestrator = build(&settings, view.unwrap_or(settings.view), date);
    let state = orchestrator.refresh(RefreshTrigger::Manual).await;
    info!(?state, "outage calendar shown");

    if let Some(id) = detail {
        match orchestrator.select_event(&id).await {
            Some(detail) => print_detail(&detail)?,
            None => println!("No outage with id {} is on the calendar.", id),
        }
    }

    if let RefreshState::Error { message } = state {
        anyhow::bail!(message);
    }
    Ok(())
}

pub async fn run_watch(settings: Settings, view: Option<ViewMode>) -> Result<()> {
    let orchestrator = build(&settings, view.unwrap_or(settings.view), None);
    tokio::select! {
        _ = orchestrator.run(settings.refresh_interval) => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("interrupted, stopping refresh loop");
        }
    }
    Ok(())
}

fn print_detail(detail: &OutageDetail) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "Outage {}", detail.id)?;
    writeln!(out, "  Type: {}", detail.outage_type)?;
    writeln!(out, "  Status: {}", detail.status)?;
    writeln!(out, "  Area: {}", detail.area)?;
    writeln!(out, "  Start: {}", detail.start)?;
    if let Some(end) = &detail.estimated_end {
        writeln!(out, "  Estimated end: {}", end)?;
    }
    if let Some(end) = &detail.actual_end {
        writeln!(out, "  Actual end: {}", end)?;
    }
    if let Some(description) = &detail.description {
        writeln!(out, "  {}", description)?;
    }
    if let Some(reason) = &detail.reason {
        writeln!(out, "  Reason: {}", reason)?;
    }
    Ok(())
}
