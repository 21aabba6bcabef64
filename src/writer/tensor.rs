//! Sparse tensor file writer
//!
//! Emits the coordinate-format text layout: a header line carrying the mode
//! count and per-mode dimension sizes, then one line per entry listing each
//! mode's 1-based index followed by the value. Fields are space-separated,
//! lines end with `\n`.
//!
//! Entries are written as they arrive; duplicate coordinates are the
//! caller's data, not this writer's concern.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::errors::{WriterError, WriterResult};

/// Buffered writer for one tensor file.
pub struct TensorWriter {
    /// Output path, kept for error context
    path: PathBuf,
    /// Buffered output
    out: BufWriter<File>,
    /// Entries written so far
    entries: u64,
}

impl TensorWriter {
    /// Creates (or truncates) the tensor file.
    pub fn create(path: &Path) -> WriterResult<Self> {
        let file = File::create(path).map_err(|e| WriterError::Create {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            entries: 0,
        })
    }

    /// Writes the header line: mode count, then each mode's dimension size.
    pub fn write_header(&mut self, dims: &[u64]) -> WriterResult<()> {
        let mut line = String::with_capacity(16 + dims.len() * 8);
        line.push_str(&dims.len().to_string());
        for dim in dims {
            line.push(' ');
            line.push_str(&dim.to_string());
        }
        line.push('\n');

        self.out
            .write_all(line.as_bytes())
            .map_err(|e| self.write_error(e))
    }

    /// Writes one entry line: the 1-based index per mode, then the value.
    ///
    /// The value text is emitted verbatim; validation happens upstream,
    /// where the source line is known.
    pub fn write_entry(&mut self, indices: &[u64], value: &str) -> WriterResult<()> {
        let mut line = String::with_capacity(indices.len() * 8 + value.len() + 1);
        for index in indices {
            line.push_str(&index.to_string());
            line.push(' ');
        }
        line.push_str(value);
        line.push('\n');

        self.out
            .write_all(line.as_bytes())
            .map_err(|e| self.write_error(e))?;
        self.entries += 1;
        Ok(())
    }

    /// Returns the number of entries written.
    pub fn entry_count(&self) -> u64 {
        self.entries
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and closes the writer. Must be called on the success path;
    /// dropping without `finish` loses buffered output silently.
    pub fn finish(mut self) -> WriterResult<()> {
        self.out.flush().map_err(|e| WriterError::Flush {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_error(&self, source: std::io::Error) -> WriterError {
        WriterError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.tns");

        let mut writer = TensorWriter::create(&path).unwrap();
        writer.write_header(&[3, 2]).unwrap();
        writer.write_entry(&[1, 2], "4.5").unwrap();
        writer.write_entry(&[3, 1], "1").unwrap();
        assert_eq!(writer.entry_count(), 2);
        writer.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "2 3 2\n1 2 4.5\n3 1 1\n");
    }

    #[test]
    fn test_value_text_is_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.tns");

        let mut writer = TensorWriter::create(&path).unwrap();
        writer.write_header(&[1]).unwrap();
        writer.write_entry(&[1], "1.50").unwrap();
        writer.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("1 1.50\n"));
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let err = match TensorWriter::create(Path::new("/no/such/dir/out.tns")) {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, WriterError::Create { .. }));
    }
}
