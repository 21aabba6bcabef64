//! CLI argument definitions using clap
//!
//! One command: convert CSV-like files into a sparse tensor. Fields can be
//! selected by header name, or by 1-based column position for headerless
//! files.

use clap::Parser;
use std::path::PathBuf;

/// tensorize - A strict, deterministic CSV-to-sparse-tensor converter
///
/// Builds a coordinate-format tensor from CSV-like files (plain, .gz, or
/// .zst). Each --field becomes a tensor mode whose distinct values are
/// numbered 1..N; without --vals the tensor is binary.
#[derive(Parser, Debug)]
#[command(name = "tensorize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CSV files to parse
    #[arg(required = true)]
    pub csv: Vec<PathBuf>,

    /// Output tensor file (.tns)
    #[arg(short = 'o', long = "output", value_name = "TENSOR")]
    pub output: PathBuf,

    /// Include FIELD as a tensor mode (header name or 1-based position)
    #[arg(short = 'f', long = "field", value_name = "FIELD")]
    pub field: Vec<String>,

    /// The field to use for values (binary tensor if omitted)
    #[arg(long, value_name = "FIELD")]
    pub vals: Option<String>,

    /// Sort a field's keys lexicographically (byte-wise ascending)
    #[arg(short = 'l', long = "sort-lex", value_name = "FIELD")]
    pub sort_lex: Vec<String>,

    /// Sort a field's integer keys numerically
    #[arg(short = 'n', long = "sort-num", value_name = "FIELD")]
    pub sort_num: Vec<String>,

    /// CSV field separator (default: auto-detect from the first line)
    #[arg(short = 'F', long = "field-sep", value_name = "SEP")]
    pub field_sep: Option<String>,

    /// Inputs have no header line; fields must be 1-based positions
    #[arg(long)]
    pub no_header: bool,

    /// Directory for the per-mode inverse map files (default: next to the
    /// tensor)
    #[arg(long, value_name = "DIR")]
    pub map_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
