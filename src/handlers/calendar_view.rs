//! Capabilities the refresh loop needs from whatever draws the calendar.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::calendar_event::{CalendarEvent, OutageDetail, Tooltip};
use crate::service::event_projector;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to draw calendar: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "month" | "daygridmonth" => Ok(ViewMode::Month),
            "week" | "timegridweek" => Ok(ViewMode::Week),
            "day" | "timegridday" => Ok(ViewMode::Day),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// A calendar surface. Implementations own the events handed to them until
/// the next `remove_all_events`.
pub trait CalendarView: Send {
    fn show_loader(&mut self);
    fn hide_loader(&mut self);
    fn remove_all_events(&mut self);
    fn add_event(&mut self, event: CalendarEvent);
    fn render(&mut self) -> Result<(), ViewError>;
    /// Replaces the calendar body with an inline error panel.
    fn show_error(&mut self, message: &str) -> Result<(), ViewError>;
    fn change_view(&mut self, mode: ViewMode);
    fn today(&mut self);
}

/// Callbacks a view dispatches when the user interacts with an event.
pub trait EventInteractions: Send + Sync {
    fn on_event_selected(&self, event: &CalendarEvent) -> OutageDetail;
    fn on_event_mounted(&self, event: &CalendarEvent) -> Tooltip;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutageInteractions;

impl EventInteractions for OutageInteractions {
    fn on_event_selected(&self, event: &CalendarEvent) -> OutageDetail {
        event_projector::detail(&event.outage)
    }

    fn on_event_mounted(&self, event: &CalendarEvent) -> Tooltip {
        event_projector::tooltip(&event.outage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_view_names_are_accepted() {
        assert_eq!("dayGridMonth".parse::<ViewMode>(), Ok(ViewMode::Month));
        assert_eq!("timeGridWeek".parse::<ViewMode>(), Ok(ViewMode::Week));
        assert_eq!(" Day ".parse::<ViewMode>(), Ok(ViewMode::Day));
        assert!("year".parse::<ViewMode>().is_err());
    }
}
