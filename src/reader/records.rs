//! Delimited record reader
//!
//! Reads one input file as a sequence of field lists. The separator comes
//! from configuration or first-line auto-detection; the header line (when
//! present) is consumed at open time and kept for name-based column
//! resolution. Blank lines are skipped; field text is passed through
//! verbatim apart from quote removal.
//!
//! Quoting follows the common CSV convention: a field wrapped in double
//! quotes may contain the separator, and `""` inside a quoted field is a
//! literal quote. Newlines inside quoted fields are not supported.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config::FieldSelector;

use super::errors::{ReaderError, ReaderResult};
use super::source::{detect_separator, open_input};

/// Streaming reader over one input file's records.
pub struct RecordReader {
    /// Input path, kept for error context
    path: PathBuf,
    /// Line source (plain or decompressed)
    reader: Box<dyn BufRead>,
    /// Resolved field separator
    separator: char,
    /// Header fields, if the file carries a header line
    header: Option<Vec<String>>,
    /// First data line, held back when it was consumed for detection
    pending: Option<String>,
    /// 1-based line number of the last line handed out
    line: u64,
}

impl RecordReader {
    /// Opens an input file and resolves its separator and header.
    ///
    /// With `separator: None` the separator is detected from the first
    /// line. With `has_header` the first line is consumed as the header;
    /// a file without even a header line is an error.
    pub fn open(path: &Path, separator: Option<char>, has_header: bool) -> ReaderResult<Self> {
        let mut reader = open_input(path)?;

        let mut first_line = String::new();
        let bytes = reader
            .read_line(&mut first_line)
            .map_err(|e| ReaderError::Read {
                path: path.to_path_buf(),
                line: 1,
                source: e,
            })?;

        if bytes == 0 && has_header {
            return Err(ReaderError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let separator =
            separator.unwrap_or_else(|| detect_separator(trim_line_ending(&first_line)));

        let mut this = Self {
            path: path.to_path_buf(),
            reader,
            separator,
            header: None,
            pending: None,
            line: 0,
        };

        if has_header {
            this.line = 1;
            let fields = this.split(trim_line_ending(&first_line), 1)?;
            this.header = Some(fields);
        } else if bytes > 0 {
            // The line sampled for detection is data; replay it first
            this.pending = Some(first_line);
        }

        Ok(this)
    }

    /// Returns the resolved field separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns the input path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the 1-based line number of the record last returned.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Resolves a column selector to a 0-based field position.
    ///
    /// Names resolve against this file's header; positions are taken as
    /// given (bounds are checked per record by `extract`, since rows may be
    /// ragged).
    pub fn resolve(&self, selector: &FieldSelector) -> ReaderResult<usize> {
        match selector {
            FieldSelector::Position(position) => Ok(position - 1),
            FieldSelector::Name(name) => {
                let header = self.header.as_deref().unwrap_or_default();
                header
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| ReaderError::UnknownColumn {
                        name: name.clone(),
                        path: self.path.clone(),
                    })
            }
        }
    }

    /// Returns the field at a resolved column of the current record.
    pub fn extract<'a>(&self, record: &'a [String], column: usize) -> ReaderResult<&'a str> {
        record
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| ReaderError::ColumnOutOfRange {
                position: column + 1,
                width: record.len(),
                path: self.path.clone(),
                line: self.line,
            })
    }

    /// Reads the next record, skipping blank lines.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(fields))` for the next data record
    /// - `Ok(None)` at end of input
    pub fn next_record(&mut self) -> ReaderResult<Option<Vec<String>>> {
        loop {
            let raw = match self.pending.take() {
                Some(line) => {
                    self.line += 1;
                    line
                }
                None => {
                    let mut line = String::new();
                    let bytes =
                        self.reader
                            .read_line(&mut line)
                            .map_err(|e| ReaderError::Read {
                                path: self.path.clone(),
                                line: self.line + 1,
                                source: e,
                            })?;
                    if bytes == 0 {
                        return Ok(None);
                    }
                    self.line += 1;
                    line
                }
            };

            let trimmed = trim_line_ending(&raw);
            if trimmed.is_empty() {
                continue;
            }

            let fields = self.split(trimmed, self.line)?;
            return Ok(Some(fields));
        }
    }

    /// Splits one line into fields, honoring double-quoted fields.
    fn split(&self, line: &str, lineno: u64) -> ReaderResult<Vec<String>> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut chars = line.chars().peekable();
        let mut in_quotes = false;

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    }
                    c => field.push(c),
                }
            } else if c == '"' && field.is_empty() {
                in_quotes = true;
            } else if c == self.separator {
                fields.push(std::mem::take(&mut field));
            } else {
                field.push(c);
            }
        }

        if in_quotes {
            return Err(ReaderError::UnterminatedQuote {
                path: self.path.clone(),
                line: lineno,
            });
        }

        fields.push(field);
        Ok(fields)
    }
}

fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
