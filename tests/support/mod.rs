#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use poweralert::clients::outage_client::{FetchError, OutageFetcher};
use poweralert::handlers::calendar_view::{CalendarView, ViewError, ViewMode};
use poweralert::models::calendar_event::CalendarEvent;
use poweralert::models::outage::{AffectedArea, Outage, OutageStatus, OutageType};
use tokio::sync::oneshot;

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

pub fn outage(id: &str, outage_type: &str, status: &str, area: Option<&str>) -> Outage {
    Outage {
        id: id.to_string(),
        outage_type: OutageType::from(outage_type.to_string()),
        status: OutageStatus::from(status.to_string()),
        start_time: at(12, 8),
        estimated_end_time: Some(at(12, 12)),
        actual_end_time: None,
        affected_area: area.map(|name| AffectedArea {
            name: Some(name.to_string()),
            city: None,
        }),
        description: None,
        reason: None,
    }
}

/// Returns scripted responses in order; repeats the last one when exhausted.
pub struct FakeFetcher {
    responses: Mutex<Vec<Result<Vec<Outage>, String>>>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new(responses: Vec<Result<Vec<Outage>, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OutageFetcher for FakeFetcher {
    async fn fetch_all(&self) -> Result<Vec<Outage>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().unwrap();
        let next = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses.first().cloned().unwrap_or_else(|| Ok(Vec::new()))
        };
        next.map_err(FetchError::Network)
    }
}

type Gate = oneshot::Receiver<Result<Vec<Outage>, FetchError>>;

/// Each call blocks until the test releases the matching sender.
pub struct GatedFetcher {
    gates: Mutex<Vec<Option<Gate>>>,
    calls: AtomicUsize,
}

impl GatedFetcher {
    pub fn new(count: usize) -> (Self, Vec<oneshot::Sender<Result<Vec<Outage>, FetchError>>>) {
        let mut senders = Vec::with_capacity(count);
        let mut gates = Vec::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            gates.push(Some(rx));
        }
        (
            Self {
                gates: Mutex::new(gates),
                calls: AtomicUsize::new(0),
            },
            senders,
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OutageFetcher for GatedFetcher {
    async fn fetch_all(&self) -> Result<Vec<Outage>, FetchError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap()[index]
            .take()
            .expect("no gate left for this call");
        gate.await.expect("gate sender dropped")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ShowLoader,
    HideLoader,
    RemoveAll,
    Add(String),
    Render,
    Error(String),
    ChangeView(ViewMode),
    Today,
}

#[derive(Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub events: Vec<CalendarEvent>,
    pub loading: bool,
    pub error: Option<String>,
    pub mode: ViewMode,
}

impl RecordingView {
    pub fn event_ids(&self) -> Vec<String> {
        self.events.iter().map(|event| event.id.clone()).collect()
    }
}

impl CalendarView for RecordingView {
    fn show_loader(&mut self) {
        self.loading = true;
        self.error = None;
        self.calls.push(ViewCall::ShowLoader);
    }

    fn hide_loader(&mut self) {
        self.loading = false;
        self.calls.push(ViewCall::HideLoader);
    }

    fn remove_all_events(&mut self) {
        self.events.clear();
        self.calls.push(ViewCall::RemoveAll);
    }

    fn add_event(&mut self, event: CalendarEvent) {
        self.calls.push(ViewCall::Add(event.id.clone()));
        self.events.push(event);
    }

    fn render(&mut self) -> Result<(), ViewError> {
        self.calls.push(ViewCall::Render);
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), ViewError> {
        self.error = Some(message.to_string());
        self.calls.push(ViewCall::Error(message.to_string()));
        Ok(())
    }

    fn change_view(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.calls.push(ViewCall::ChangeView(mode));
    }

    fn today(&mut self) {
        self.calls.push(ViewCall::Today);
    }
}
