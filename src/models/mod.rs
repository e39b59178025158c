pub mod calendar_event;
pub mod outage;
pub mod timestamp;
