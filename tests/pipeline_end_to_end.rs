//! End-to-End Pipeline Tests
//!
//! Drive the full conversion through the library API: CSV files in a temp
//! directory in, tensor file and inverse map files out.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tensorize::cli::convert;
use tensorize::config::{FieldSelector, TensorConfig};
use tensorize::index::KeyOrder;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_gz(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn field(raw: &str) -> FieldSelector {
    FieldSelector::parse(raw).unwrap()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// =============================================================================
// Basic Conversion Tests
// =============================================================================

/// Header CSV with two modes and a value column produces the expected
/// tensor and map files, byte for byte.
#[test]
fn test_two_mode_tensor_with_values() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "ratings.csv",
        "user,item,rating\nbob,book,4.5\nalice,book,2\nbob,album,5\n",
    );
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("user")).unwrap();
    config.add_mode(field("item")).unwrap();
    config
        .set_mode_order(&field("item"), KeyOrder::Lexicographic)
        .unwrap();
    config.set_value_field(field("rating"));

    convert(&config).unwrap();

    // user is first-seen (bob, alice); item is lexicographic (album, book)
    assert_eq!(read(&tensor), "2 2 2\n1 2 4.5\n2 2 2\n1 1 5\n");
    assert_eq!(read(&dir.path().join("out.user.map")), "bob\nalice\n");
    assert_eq!(read(&dir.path().join("out.item.map")), "album\nbook\n");
}

/// Without a value column the tensor is binary: every entry's value is 1.
#[test]
fn test_binary_tensor_without_values() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "user,item\nbob,book\nalice,album\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("user")).unwrap();
    config.add_mode(field("item")).unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "2 2 2\n1 1 1\n2 2 1\n");
}

/// Duplicate records each produce an entry; the pipeline does not
/// deduplicate coordinates.
#[test]
fn test_duplicate_records_kept() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "user\nbob\nbob\nbob\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("user")).unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "1 1\n1 1\n1 1\n1 1\n");
}

/// Keys observed across several input files share one index space.
#[test]
fn test_multiple_input_files() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(&dir, "a.csv", "user\nbob\nalice\n");
    let second = write_csv(&dir, "b.csv", "user\ncarol\nbob\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![first, second], tensor.clone());
    config.add_mode(field("user")).unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "1 3\n1 1\n2 1\n3 1\n1 1\n");
    assert_eq!(
        read(&dir.path().join("out.user.map")),
        "bob\nalice\ncarol\n"
    );
}

// =============================================================================
// Input Format Tests
// =============================================================================

/// Gzip-compressed input decompresses transparently.
#[test]
fn test_gzip_input() {
    let dir = TempDir::new().unwrap();
    let csv = write_gz(&dir, "in.csv.gz", "user\nbob\nalice\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("user")).unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "1 2\n1 1\n2 1\n");
}

/// Headerless input with 1-based positional selectors.
#[test]
fn test_no_header_positional_fields() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "alice,book\nbob,album\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.set_no_header();
    config.add_mode(field("1")).unwrap();
    config.add_mode(field("2")).unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "2 2 2\n1 1 1\n2 2 1\n");
    assert_eq!(read(&dir.path().join("out.1.map")), "alice\nbob\n");
    assert_eq!(read(&dir.path().join("out.2.map")), "book\nalbum\n");
}

/// Tab-separated input is auto-detected.
#[test]
fn test_tab_separator_auto_detected() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.tsv", "user\titem\nbob\tbook\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("user")).unwrap();
    config.add_mode(field("item")).unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "2 1 1\n1 1 1\n");
}

// =============================================================================
// Ordering Policy Tests
// =============================================================================

/// Numeric mode sorts keys by integer value end to end.
#[test]
fn test_numeric_sort_end_to_end() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "year\n2001\n1999\n2001\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("year")).unwrap();
    config
        .set_mode_order(&field("year"), KeyOrder::Numeric)
        .unwrap();

    convert(&config).unwrap();

    assert_eq!(read(&tensor), "1 2\n2 1\n1 1\n2 1\n");
    assert_eq!(read(&dir.path().join("out.year.map")), "1999\n2001\n");
}

/// A non-integer key under numeric sort fails the conversion, names the
/// key, and writes no tensor file.
#[test]
fn test_numeric_sort_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "year\n1999\nunknown\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("year")).unwrap();
    config
        .set_mode_order(&field("year"), KeyOrder::Numeric)
        .unwrap();

    let err = convert(&config).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("unknown"));
    assert!(!tensor.exists());
    assert!(!dir.path().join("out.year.map").exists());
}

// =============================================================================
// Failure Path Tests
// =============================================================================

/// A value that does not parse as a number fails the emission pass.
#[test]
fn test_non_numeric_value_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "user,rating\nbob,great\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor);
    config.add_mode(field("user")).unwrap();
    config.set_value_field(field("rating"));

    let err = convert(&config).unwrap_err();
    assert!(err.to_string().contains("great"));
}

/// A mode column missing from the header fails before any output exists.
#[test]
fn test_unknown_column_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "in.csv", "user,item\nbob,book\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor.clone());
    config.add_mode(field("rating")).unwrap();

    let err = convert(&config).unwrap_err();
    assert!(err.to_string().contains("rating"));
    assert!(!tensor.exists());
}

// =============================================================================
// Output Layout Tests
// =============================================================================

/// Map files land in the override directory when one is set.
#[test]
fn test_map_dir_override() {
    let dir = TempDir::new().unwrap();
    let maps = dir.path().join("maps");
    std::fs::create_dir(&maps).unwrap();
    let csv = write_csv(&dir, "in.csv", "user\nbob\n");
    let tensor = dir.path().join("out.tns");

    let mut config = TensorConfig::new(vec![csv], tensor);
    config.add_mode(field("user")).unwrap();
    config.set_map_dir(maps.clone());

    convert(&config).unwrap();

    assert_eq!(read(&maps.join("out.user.map")), "bob\n");
}
