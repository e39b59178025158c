pub mod calendar_view;
pub mod terminal_view;
