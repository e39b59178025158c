//! Fetch, project, and render cycles for the outage calendar.
//!
//! Cycles are not fenced: a slow fetch started earlier can finish after a
//! newer one and its result is what stays on screen.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::clients::outage_client::{FetchError, OutageFetcher};
use crate::handlers::calendar_view::{CalendarView, EventInteractions, ViewMode};
use crate::models::calendar_event::{CalendarEvent, OutageDetail, Tooltip};
use crate::models::outage::Outage;
use crate::service::event_projector::project_all;
use crate::service::sample_outages::sample_outages;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load outages. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshState {
    Loading,
    Rendered { events: usize },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Mount,
    Manual,
    Timer,
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefreshTrigger::Mount => "mount",
            RefreshTrigger::Manual => "manual",
            RefreshTrigger::Timer => "timer",
        })
    }
}

struct Shared<V> {
    view: V,
    state: RefreshState,
    last_outages: Vec<Arc<Outage>>,
    displayed: Vec<CalendarEvent>,
}

struct Inner<V> {
    fetcher: Arc<dyn OutageFetcher>,
    interactions: Arc<dyn EventInteractions>,
    shared: Mutex<Shared<V>>,
}

/// Cloneable handle; every clone drives the same view.
pub struct RefreshOrchestrator<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for RefreshOrchestrator<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: CalendarView + 'static> RefreshOrchestrator<V> {
    pub fn new(
        fetcher: Arc<dyn OutageFetcher>,
        interactions: Arc<dyn EventInteractions>,
        view: V,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                interactions,
                shared: Mutex::new(Shared {
                    view,
                    state: RefreshState::Loading,
                    last_outages: Vec::new(),
                    displayed: Vec::new(),
                }),
            }),
        }
    }

    /// Runs one cycle to completion and returns the state it left behind.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> RefreshState {
        let cycle_id = Uuid::new_v4();
        let span = info_span!("refresh_cycle", %cycle_id, %trigger);
        async move {
            self.enter_loading().await;
            let result = self.inner.fetcher.fetch_all().await;
            let mut shared = self.inner.shared.lock().await;
            match result {
                Ok(outages) => Self::apply_outages(&mut shared, outages),
                Err(err) => Self::apply_failure(&mut shared, &err),
            }
            shared.state.clone()
        }
        .instrument(span)
        .await
    }

    /// Starts a cycle in the background without waiting for earlier ones.
    pub fn trigger(&self, trigger: RefreshTrigger) -> JoinHandle<RefreshState> {
        let this = self.clone();
        tokio::spawn(async move { this.refresh(trigger).await })
    }

    /// Refreshes on mount and then on every tick, forever.
    pub async fn run(&self, period: Duration) {
        info!(period_secs = period.as_secs(), "starting outage refresh loop");
        self.trigger(RefreshTrigger::Mount);
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            self.trigger(RefreshTrigger::Timer);
        }
    }

    pub async fn today(&self) {
        let mut shared = self.inner.shared.lock().await;
        shared.view.today();
        Self::render(&mut shared);
    }

    pub async fn change_view(&self, mode: ViewMode) {
        let mut shared = self.inner.shared.lock().await;
        debug!(%mode, "changing calendar view");
        shared.view.change_view(mode);
        Self::render(&mut shared);
    }

    pub async fn select_event(&self, event_id: &str) -> Option<OutageDetail> {
        let shared = self.inner.shared.lock().await;
        shared
            .displayed
            .iter()
            .find(|event| event.id == event_id)
            .map(|event| self.inner.interactions.on_event_selected(event))
    }

    pub async fn event_tooltip(&self, event_id: &str) -> Option<Tooltip> {
        let shared = self.inner.shared.lock().await;
        shared
            .displayed
            .iter()
            .find(|event| event.id == event_id)
            .map(|event| self.inner.interactions.on_event_mounted(event))
    }

    pub async fn state(&self) -> RefreshState {
        self.inner.shared.lock().await.state.clone()
    }

    /// Records from the most recent successful fetch.
    pub async fn last_outages(&self) -> Vec<Arc<Outage>> {
        self.inner.shared.lock().await.last_outages.clone()
    }

    pub async fn view(&self) -> ViewGuard<'_, V> {
        ViewGuard {
            guard: self.inner.shared.lock().await,
        }
    }

    async fn enter_loading(&self) {
        let mut shared = self.inner.shared.lock().await;
        info!("refresh cycle started");
        shared.state = RefreshState::Loading;
        shared.view.show_loader();
    }

    fn apply_outages(shared: &mut Shared<V>, outages: Vec<Outage>) {
        let outages: Vec<Arc<Outage>> = outages.into_iter().map(Arc::new).collect();
        let events = project_all(&outages);
        let count = events.len();

        shared.view.hide_loader();
        Self::repopulate(shared, events);
        shared.last_outages = outages;
        shared.state = RefreshState::Rendered { events: count };
        info!(events = count, "calendar repopulated");
    }

    fn apply_failure(shared: &mut Shared<V>, err: &FetchError) {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        error!(error = %message, "failed to fetch outages");

        shared.view.hide_loader();
        if let Err(view_err) = shared.view.show_error(&message) {
            warn!(error = %view_err, "could not show error panel");
        }
        let fallback = project_all(&sample_outages(Utc::now()));
        Self::repopulate(shared, fallback);
        shared.state = RefreshState::Error { message };
    }

    fn repopulate(shared: &mut Shared<V>, events: Vec<CalendarEvent>) {
        shared.view.remove_all_events();
        for event in &events {
            shared.view.add_event(event.clone());
        }
        shared.displayed = events;
        Self::render(shared);
    }

    fn render(shared: &mut Shared<V>) {
        if let Err(err) = shared.view.render() {
            warn!(error = %err, "calendar render failed");
        }
    }
}

/// Locked access to the view for inspection.
pub struct ViewGuard<'a, V> {
    guard: MutexGuard<'a, Shared<V>>,
}

impl<V> std::ops::Deref for ViewGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.guard.view
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::handlers::calendar_view::OutageInteractions;
    use crate::handlers::terminal_view::TerminalCalendarView;

    struct Unreachable;

    #[async_trait]
    impl OutageFetcher for Unreachable {
        async fn fetch_all(&self) -> Result<Vec<Outage>, FetchError> {
            Err(FetchError::Network("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn error_cycle_draws_panel_and_samples_on_terminal() {
        let calendar = TerminalCalendarView::new(
            Vec::new(),
            OutageInteractions,
            chrono_tz::UTC,
            ViewMode::Week,
        );
        let orchestrator =
            RefreshOrchestrator::new(Arc::new(Unreachable), Arc::new(OutageInteractions), calendar);

        let state = orchestrator.refresh(RefreshTrigger::Mount).await;
        assert!(matches!(state, RefreshState::Error { .. }));

        let view = orchestrator.view().await;
        let printed = String::from_utf8(view.writer().clone()).unwrap();
        assert!(printed.starts_with("Loading outages..."));
        assert!(printed.contains("!! Could not reach the outage service: connection reset"));
        assert!(printed.contains("ELECTRICITY - Downtown"));
        assert!(!view.is_loading());
        assert_eq!(view.events().len(), 3);
    }
}
