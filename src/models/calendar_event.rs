use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::outage::Outage;

/// Display-ready projection of an [`Outage`]. Rebuilt on every refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub background_color: String,
    pub border_color: String,
    pub text_color: String,
    pub outage: Arc<Outage>,
}

/// Hover payload shown next to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub heading: String,
    pub status: String,
    pub area: String,
    pub start: String,
    pub end: String,
}

impl Tooltip {
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.heading.clone(),
            format!("Status: {}", self.status),
            format!("Area: {}", self.area),
            format!("Start: {}", self.start),
            format!("End: {}", self.end),
        ]
    }
}

/// Click payload: everything known about the originating outage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageDetail {
    pub id: String,
    pub outage_type: String,
    pub status: String,
    pub area: String,
    pub start: String,
    pub estimated_end: Option<String>,
    pub actual_end: Option<String>,
    pub description: Option<String>,
    pub reason: Option<String>,
}
