//! Record reader subsystem for tensorize
//!
//! Turns CSV-like input files into sequences of string fields for the index
//! and emission passes.
//!
//! # Design Principles
//!
//! - Single pass, streaming: one line in memory at a time
//! - Deterministic separator auto-detection (first-line candidate counting)
//! - Transparent decompression by extension (`.gz`, `.zst`)
//! - Field text reaches the index maps verbatim; no normalization beyond
//!   quote removal and line-ending trimming

mod errors;
mod records;
mod source;

pub use errors::{ReaderError, ReaderResult};
pub use records::RecordReader;
pub use source::{detect_separator, open_input};
