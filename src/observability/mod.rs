//! Observability subsystem for tensorize
//!
//! Structured, deterministic, synchronous logging:
//! - JSON log lines with stable key ordering
//! - Phase scopes with begin/complete/failed events
//! - No buffering; ERROR and FATAL to stderr

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
