pub mod display;
pub mod query_service;

pub use display::{DisplaySink, DisplayState, Output, TriggerState};
pub use query_service::{QueryOutcome, QueryService, CONNECTION_ERROR, GENERIC_ERROR};
