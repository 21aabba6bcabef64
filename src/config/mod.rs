//! Configuration subsystem for tensorize
//!
//! Describes a single CSV-to-tensor conversion: inputs, output, separator,
//! modes with their ordering policies, and the optional value column. The
//! CLI assembles a `TensorConfig`; validation happens once, before any input
//! is read.

mod errors;
mod tensor;

pub use errors::{ConfigError, ConfigResult};
pub use tensor::{FieldSelector, ModeSpec, TensorConfig};
