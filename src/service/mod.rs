pub mod event_projector;
pub mod sample_outages;
