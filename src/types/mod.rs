//! Core type definitions for robokit

mod error;
mod event;
mod request;
mod stats;

pub use error::RoboError;
pub use event::ParseEvent;
pub use request::{CopyRequest, DEFAULT_FILE_PATTERN};
pub use stats::{CopyErrorRecord, CopyStatistics, CopyWarning};
