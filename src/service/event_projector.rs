//! Outage to calendar-event projection.
//!
//! Colors are picked per outage type, then the status may fade the fill
//! (ONGOING, COMPLETED) or replace both colors (CANCELLED).

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::calendar_event::{CalendarEvent, OutageDetail, Tooltip};
use crate::models::outage::{Outage, OutageStatus, OutageType};

pub const TITLE_AREA_FALLBACK: &str = "Unknown Area";
pub const TOOLTIP_AREA_FALLBACK: &str = "Unknown";
pub const TOOLTIP_END_FALLBACK: &str = "TBD";

pub const TEXT_COLOR: &str = "#ffffff";
pub const ONGOING_ALPHA: &str = "e6";
pub const COMPLETED_ALPHA: &str = "99";
pub const CANCELLED_COLORS: ColorPair = ColorPair::new("#9ca3af", "#6b7280");

const ELECTRICITY_COLORS: ColorPair = ColorPair::new("#6366f1", "#4f46e5");
const WATER_COLORS: ColorPair = ColorPair::new("#0ea5e9", "#0284c7");
const GAS_COLORS: ColorPair = ColorPair::new("#f97316", "#ea580c");
const INTERNET_COLORS: ColorPair = ColorPair::new("#a855f7", "#9333ea");
const NEUTRAL_COLORS: ColorPair = ColorPair::new("#6b7280", "#4b5563");

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub fill: &'static str,
    pub border: &'static str,
}

impl ColorPair {
    pub const fn new(fill: &'static str, border: &'static str) -> Self {
        Self { fill, border }
    }
}

pub fn base_colors(outage_type: &OutageType) -> ColorPair {
    match outage_type {
        OutageType::Electricity => ELECTRICITY_COLORS,
        OutageType::Water => WATER_COLORS,
        OutageType::Gas => GAS_COLORS,
        OutageType::Internet => INTERNET_COLORS,
        OutageType::Other(_) => NEUTRAL_COLORS,
    }
}

/// Returns `(fill, border)` after the status override.
pub fn event_colors(outage_type: &OutageType, status: &OutageStatus) -> (String, String) {
    let base = base_colors(outage_type);
    match status {
        OutageStatus::Ongoing => (format!("{}{}", base.fill, ONGOING_ALPHA), base.border.to_string()),
        OutageStatus::Completed => (
            format!("{}{}", base.fill, COMPLETED_ALPHA),
            base.border.to_string(),
        ),
        OutageStatus::Cancelled => (
            CANCELLED_COLORS.fill.to_string(),
            CANCELLED_COLORS.border.to_string(),
        ),
        OutageStatus::Scheduled | OutageStatus::Other(_) => {
            (base.fill.to_string(), base.border.to_string())
        }
    }
}

pub fn event_title(outage: &Outage) -> String {
    format!(
        "{} - {}",
        outage.outage_type,
        outage.area_name().unwrap_or(TITLE_AREA_FALLBACK)
    )
}

pub fn project(outage: &Arc<Outage>) -> CalendarEvent {
    let (background_color, border_color) = event_colors(&outage.outage_type, &outage.status);
    CalendarEvent {
        id: outage.id.clone(),
        title: event_title(outage),
        start: outage.start_time,
        end: outage.display_end(),
        background_color,
        border_color,
        text_color: TEXT_COLOR.to_string(),
        outage: Arc::clone(outage),
    }
}

pub fn project_all(outages: &[Arc<Outage>]) -> Vec<CalendarEvent> {
    outages.iter().map(project).collect()
}

pub fn tooltip(outage: &Outage) -> Tooltip {
    Tooltip {
        heading: format!("{} Outage", outage.outage_type),
        status: outage.status.to_string(),
        area: outage
            .area_name()
            .unwrap_or(TOOLTIP_AREA_FALLBACK)
            .to_string(),
        start: format_time(outage.start_time),
        end: outage
            .display_end()
            .map(format_time)
            .unwrap_or_else(|| TOOLTIP_END_FALLBACK.to_string()),
    }
}

pub fn detail(outage: &Outage) -> OutageDetail {
    OutageDetail {
        id: outage.id.clone(),
        outage_type: outage.outage_type.to_string(),
        status: outage.status.to_string(),
        area: outage
            .area_name()
            .unwrap_or(TOOLTIP_AREA_FALLBACK)
            .to_string(),
        start: format_time(outage.start_time),
        estimated_end: outage.estimated_end_time.map(format_time),
        actual_end: outage.actual_end_time.map(format_time),
        description: outage.description.clone(),
        reason: outage.reason.clone(),
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}
