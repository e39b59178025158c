use std::io::Write;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::handlers::calendar_view::{CalendarView, EventInteractions, ViewError, ViewMode};
use crate::models::calendar_event::CalendarEvent;

pub const LOADER_TEXT: &str = "Loading outages...";

/// Text calendar drawn to any writer. Events are bucketed by local day in the
/// configured timezone.
pub struct TerminalCalendarView<W: Write + Send, I: EventInteractions> {
    out: W,
    interactions: I,
    tz: Tz,
    mode: ViewMode,
    focus: NaiveDate,
    events: Vec<CalendarEvent>,
    loading: bool,
    error: Option<String>,
}

impl<W: Write + Send, I: EventInteractions> TerminalCalendarView<W, I> {
    pub fn new(out: W, interactions: I, tz: Tz, mode: ViewMode) -> Self {
        let focus = Utc::now().with_timezone(&tz).date_naive();
        Self {
            out,
            interactions,
            tz,
            mode,
            focus,
            events: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn with_focus(mut self, focus: NaiveDate) -> Self {
        self.focus = focus;
        self
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn focus(&self) -> NaiveDate {
        self.focus
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// First and last local day covered by the current mode.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            ViewMode::Month => {
                let first = self.focus.with_day(1).unwrap_or(self.focus);
                let next_month = if first.month() == 12 {
                    NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
                };
                let last = next_month
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(first);
                (first, last)
            }
            ViewMode::Week => {
                let offset = self.focus.weekday().num_days_from_monday() as i64;
                let monday = self.focus - Duration::days(offset);
                (monday, monday + Duration::days(6))
            }
            ViewMode::Day => (self.focus, self.focus),
        }
    }

    fn window_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (first, last) = self.window();
        (
            self.local_midnight(first),
            self.local_midnight(last + Duration::days(1)),
        )
    }

    fn local_midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        let Some(naive) = day.and_hms_opt(0, 0, 0) else {
            return DateTime::<Utc>::MIN_UTC;
        };
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc())
    }

    fn visible_events(&self) -> Vec<&CalendarEvent> {
        let (from, until) = self.window_bounds();
        let mut visible: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|event| {
                let end = event.end.unwrap_or(event.start);
                event.start < until && end >= from
            })
            .collect();
        visible.sort_by_key(|event| event.start);
        visible
    }

    fn heading(&self) -> String {
        let (first, last) = self.window();
        match self.mode {
            ViewMode::Month => format!("Outages for {}", self.focus.format("%B %Y")),
            ViewMode::Week => format!(
                "Outages for week of {} - {}",
                first.format("%b %d"),
                last.format("%b %d, %Y")
            ),
            ViewMode::Day => format!("Outages for {}", self.focus.format("%A, %B %d, %Y")),
        }
    }

    fn local_time(&self, time: DateTime<Utc>) -> String {
        time.with_timezone(&self.tz).format("%a %d %H:%M").to_string()
    }
}

impl<W: Write + Send, I: EventInteractions> CalendarView for TerminalCalendarView<W, I> {
    fn show_loader(&mut self) {
        self.loading = true;
        self.error = None;
        let _ = writeln!(self.out, "{}", LOADER_TEXT);
    }

    fn hide_loader(&mut self) {
        self.loading = false;
    }

    fn remove_all_events(&mut self) {
        self.events.clear();
    }

    fn add_event(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    fn render(&mut self) -> Result<(), ViewError> {
        let mut body = String::new();
        body.push_str(&format!("== {} ==\n", self.heading()));
        if let Some(message) = &self.error {
            body.push_str(&format!("!! {}\n", message));
        }

        let visible = self.visible_events();
        if visible.is_empty() {
            body.push_str("No outages in this period.\n");
        }
        for event in visible {
            let end = event
                .end
                .map(|end| self.local_time(end))
                .unwrap_or_else(|| "open".to_string());
            body.push_str(&format!(
                "{} -> {}  {} [{}]\n",
                self.local_time(event.start),
                end,
                event.title,
                event.background_color
            ));
            let tooltip = self.interactions.on_event_mounted(event);
            for line in tooltip.lines().iter().skip(1) {
                body.push_str(&format!("    {}\n", line));
            }
        }

        self.out.write_all(body.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), ViewError> {
        self.error = Some(message.to_string());
        writeln!(self.out, "!! {}", message)?;
        Ok(())
    }

    fn change_view(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    fn today(&mut self) {
        self.focus = Utc::now().with_timezone(&self.tz).date_naive();
    }
}
