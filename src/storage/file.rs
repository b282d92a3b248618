//! File-based key-value storage.
//!
//! Stores each key as a file in a directory.

use std::path::PathBuf;

use crate::CoreError;

use super::KeyValueStore;

/// File-based key-value storage.
///
/// Each key is stored as a file named after the key in the configured
/// directory. Key segments such as `:` are mapped to `.` so that structured
/// keys like `completion:7:u1` produce plain filenames.
///
/// # Example
///
/// ```rust,ignore
/// use coursebound::FileStore;
///
/// let store = FileStore::new("/var/lib/myapp/state")?;
/// ```
#[derive(Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a new file store.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| CoreError::Storage(format!("Failed to create storage directory: {e}")))?;
        Ok(Self { directory: dir })
    }

    /// Returns the file path for a key.
    ///
    /// Keys are restricted to alphanumerics plus `:`, `-` and `_`; anything
    /// else yields `None` so a hostile key can never escape the directory.
    fn key_path(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_'))
        {
            return None;
        }

        let file_name: String = key
            .chars()
            .map(|c| if c == ':' { '.' } else { c })
            .collect();

        Some(self.directory.join(file_name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let Some(path) = self.key_path(key) else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| CoreError::Storage(format!("Failed to read value file: {e}")))?;

        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let Some(path) = self.key_path(key) else {
            return Err(CoreError::Storage(format!("Invalid storage key: {key}")));
        };

        // write to a sibling temp file and rename over the target, so a
        // crash mid-write can never leave a truncated record behind; `#`
        // cannot appear in a mapped key name, so the temp name cannot
        // collide with another key's file
        let mut tmp = path.clone().into_os_string();
        tmp.push("#tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, value)
            .map_err(|e| CoreError::Storage(format!("Failed to write value file: {e}")))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| CoreError::Storage(format!("Failed to replace value file: {e}")))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let Some(path) = self.key_path(key) else {
            return Ok(());
        };

        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| CoreError::Storage(format!("Failed to delete value file: {e}")))?;
        }

        Ok(())
    }
}
