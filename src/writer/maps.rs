//! Inverse map files
//!
//! After a build, each mode's key-to-index mapping is serialized inverted:
//! one key per line, line number = index. Downstream consumers use these
//! files to translate tensor indices back into labels.
//!
//! Files are named `<tensor stem>.<mode>.map` and written to the configured
//! map directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::TensorConfig;
use crate::index::ModeManager;

use super::errors::{WriterError, WriterResult};

/// Writes one inverse map file per mode. Returns the written paths in mode
/// order.
///
/// Every file is flushed before the next is started; a failure leaves
/// earlier files complete on disk.
pub fn write_mode_maps(
    manager: &ModeManager,
    config: &TensorConfig,
) -> WriterResult<Vec<PathBuf>> {
    let stem = config
        .output()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tensor");

    let mut written = Vec::with_capacity(manager.mode_count());
    for mode in manager.mode_names() {
        let path = config.map_dir().join(format!("{}.{}.map", stem, mode));

        let file = File::create(&path).map_err(|e| WriterError::Create {
            path: path.clone(),
            source: e,
        })?;
        let mut out = BufWriter::new(file);

        let map = manager.map(mode).map_err(|e| WriterError::Map {
            path: path.clone(),
            source: e,
        })?;
        map.write_inverse(&mut out).map_err(|e| WriterError::Map {
            path: path.clone(),
            source: e,
        })?;

        out.flush().map_err(|e| WriterError::Flush {
            path: path.clone(),
            source: e,
        })?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::KeyOrder;

    fn built_manager() -> ModeManager {
        let mut manager = ModeManager::new(
            &[
                ("user".to_string(), KeyOrder::FirstSeen),
                ("item".to_string(), KeyOrder::Lexicographic),
            ],
            None,
        );
        manager.observe("user", "bob").unwrap();
        manager.observe("user", "alice").unwrap();
        manager.observe("item", "book").unwrap();
        manager.observe("item", "album").unwrap();
        manager.build_all().unwrap();
        manager
    }

    #[test]
    fn test_one_file_per_mode() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = TensorConfig::new(
            vec![PathBuf::from("in.csv")],
            dir.path().join("out.tns"),
        );
        config.add_mode(crate::config::FieldSelector::parse("user").unwrap()).unwrap();
        config.add_mode(crate::config::FieldSelector::parse("item").unwrap()).unwrap();

        let manager = built_manager();
        let written = write_mode_maps(&manager, &config).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("out.user.map"),
                dir.path().join("out.item.map"),
            ]
        );

        // user is first-seen: bob then alice
        let user = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(user, "bob\nalice\n");

        // item is lexicographic: album then book
        let item = std::fs::read_to_string(&written[1]).unwrap();
        assert_eq!(item, "album\nbook\n");
    }

    #[test]
    fn test_map_dir_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let map_dir = dir.path().join("maps");
        std::fs::create_dir(&map_dir).unwrap();

        let mut config = TensorConfig::new(
            vec![PathBuf::from("in.csv")],
            dir.path().join("out.tns"),
        );
        config.add_mode(crate::config::FieldSelector::parse("user").unwrap()).unwrap();
        config.add_mode(crate::config::FieldSelector::parse("item").unwrap()).unwrap();
        config.set_map_dir(map_dir.clone());

        let manager = built_manager();
        let written = write_mode_maps(&manager, &config).unwrap();
        assert!(written.iter().all(|p| p.parent() == Some(map_dir.as_path())));
    }

    #[test]
    fn test_unbuilt_manager_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = TensorConfig::new(
            vec![PathBuf::from("in.csv")],
            dir.path().join("out.tns"),
        );

        let manager = ModeManager::new(&[("user".to_string(), KeyOrder::FirstSeen)], None);
        let err = write_mode_maps(&manager, &config).unwrap_err();
        assert!(matches!(err, WriterError::Map { .. }));
    }
}
