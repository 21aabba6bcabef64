//! tensorize - A strict, deterministic CSV-to-sparse-tensor converter
//!
//! Maps the distinct values of selected CSV columns ("modes") to contiguous
//! 1-based indices and emits a coordinate-format tensor plus per-mode
//! inverse map files.

pub mod cli;
pub mod config;
pub mod index;
pub mod observability;
pub mod reader;
pub mod writer;
