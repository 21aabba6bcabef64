//! Observation scopes for pipeline phases
//!
//! Each phase of a conversion (accumulation pass, index build, emission
//! pass) runs inside a scope that logs `{name}_BEGIN` on entry and
//! `{name}_COMPLETE` or `{name}_FAILED` on exit. A scope dropped without
//! either is logged as incomplete.

use std::cell::Cell;

use super::logger::Logger;

/// Logs the begin/complete/failed lifecycle of one named phase.
pub struct ObservationScope<'a> {
    name: &'a str,
    finished: Cell<bool>,
}

impl<'a> ObservationScope<'a> {
    /// Opens the scope, logging `{name}_BEGIN` at INFO.
    pub fn new(name: &'a str) -> Self {
        Logger::info(&format!("{}_BEGIN", name), &[]);
        Self {
            name,
            finished: Cell::new(false),
        }
    }

    /// Closes the scope successfully, logging `{name}_COMPLETE`.
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Closes the scope successfully with result fields.
    pub fn complete_with_fields(self, fields: &[(&str, &str)]) {
        self.finished.set(true);
        Logger::info(&format!("{}_COMPLETE", self.name), fields);
    }

    /// Closes the scope as failed, logging `{name}_FAILED` at ERROR.
    pub fn fail(self, reason: &str) {
        self.finished.set(true);
        Logger::error(&format!("{}_FAILED", self.name), &[("reason", reason)]);
    }

    /// Closes the scope as failed at FATAL severity.
    pub fn fail_fatal(self, reason: &str) {
        self.finished.set(true);
        Logger::fatal(&format!("{}_FAILED", self.name), &[("reason", reason)]);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.finished.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Elapsed-time source for `*_COMPLETE` fields.
pub struct Timer {
    start: std::time::Instant,
}

impl Timer {
    /// Starts the timer.
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    /// Elapsed milliseconds as a string field value.
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
