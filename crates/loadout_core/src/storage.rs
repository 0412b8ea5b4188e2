//! Reading and writing the preset file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec;
use crate::core_api::{CoreError, CoreErrorCode};
use crate::preset::PresetStore;

const PRESETS_FILE_NAME: &str = "presets.json";
const APP_DIR_NAME: &str = ".loadout";

/// `~/.loadout/presets.json`, or relative to the working directory when no
/// home directory is known.
pub fn default_presets_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(APP_DIR_NAME)
        .join(PRESETS_FILE_NAME)
}

/// Always yields a usable store; read and parse failures fall back to the
/// bootstrap presets.
pub fn load_store(path: &Path) -> PresetStore {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no preset file yet, using defaults");
            return PresetStore::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read preset file, using defaults");
            return PresetStore::default();
        }
    };

    let loaded = codec::deserialize(&text);
    if loaded.is_empty() {
        warn!(path = %path.display(), "preset file held no presets, using defaults");
    } else {
        info!(path = %path.display(), count = loaded.len(), "loaded presets");
    }
    loaded.or_default()
}

pub fn save_store(path: &Path, store: &PresetStore) -> Result<(), CoreError> {
    write_atomically(path, &codec::serialize(store))?;
    info!(path = %path.display(), count = store.len(), "saved presets");
    Ok(())
}

/// Writes to a sibling temp file and renames it over `path`, so readers see
/// either the old document or the new one.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<(), CoreError> {
    let io_error = |action: &str, target: &Path, e: io::Error| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to {action} {}: {e}", target.display()),
        )
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| io_error("create", parent, e))?;
    }

    let mut temp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    temp_name.push(format!(".{}.tmp", std::process::id()));
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents).map_err(|e| io_error("write", &temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_store, save_store, write_atomically};
    use crate::preset::PresetStore;

    fn temp_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}_{}_{}", std::process::id(), nanos))
    }

    #[test]
    fn write_atomically_creates_parents_and_leaves_no_temp_file() {
        let root = temp_test_dir("loadout_atomic");
        let path = root.join("nested").join("presets.json");

        write_atomically(&path, "{}").expect("write should succeed");
        assert_eq!(fs::read_to_string(&path).expect("file should exist"), "{}");

        let leftovers: Vec<_> = fs::read_dir(path.parent().expect("has parent"))
            .expect("dir should be readable")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_file_loads_bootstrap_store() {
        let root = temp_test_dir("loadout_missing");
        let store = load_store(&root.join("presets.json"));
        assert_eq!(store, PresetStore::default());
    }

    #[test]
    fn saved_store_loads_back() {
        let root = temp_test_dir("loadout_save_load");
        let path = root.join("presets.json");
        let mut store = PresetStore::default();
        assert!(store.add());
        assert!(store.rename(3, "Night \"ops\""));

        save_store(&path, &store).expect("save should succeed");
        assert_eq!(load_store(&path), store);

        let _ = fs::remove_dir_all(root);
    }
}
