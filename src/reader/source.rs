//! Input sources and separator detection
//!
//! Inputs are line-oriented text files, optionally compressed. The codec is
//! chosen by extension: `.gz` (gzip) and `.zst` (zstandard) are decompressed
//! transparently; everything else is read as plain text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use super::errors::{ReaderError, ReaderResult};

/// Separator candidates for auto-detection, in precedence order.
const SEPARATOR_CANDIDATES: [char; 4] = [',', '\t', ';', '|'];

/// Opens an input file, decompressing by extension.
pub fn open_input(path: &Path) -> ReaderResult<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| ReaderError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("gz") => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
        Some("zst") => {
            let decoder = zstd::Decoder::new(file).map_err(|e| ReaderError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Box::new(BufReader::new(decoder)))
        }
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Picks the field separator for a file from its first line.
///
/// The candidate (`,` `\t` `;` `|`) occurring most often wins; ties go to
/// the earlier candidate, and a line containing none of them falls back to
/// the comma. Deterministic for any input.
pub fn detect_separator(first_line: &str) -> char {
    let mut best = SEPARATOR_CANDIDATES[0];
    let mut best_count = 0usize;
    for candidate in SEPARATOR_CANDIDATES {
        let count = first_line.matches(candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}
