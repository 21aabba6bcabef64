//! Index subsystem for tensorize
//!
//! Maps the distinct keys of each tensor mode to contiguous 1-based indices.
//!
//! # Design Principles
//!
//! - Build-once: accumulation and lookup phases are separated by a single
//!   `build()`; built maps are immutable
//! - Deterministic: a fixed ordering policy per mode, no environment-
//!   dependent collation
//! - Typed failures: a bad key fails the build with a `Result`, never a
//!   process exit inside the core
//!
//! # Invariants
//!
//! - A built map's indices are exactly `{1, ..., N}`, each used once
//! - Lookups before build, and mutation after build, are rejected

mod errors;
mod manager;
mod map;

pub use errors::{IndexError, IndexErrorCode, IndexResult, Severity};
pub use manager::ModeManager;
pub use map::{IndexMap, KeyOrder};
