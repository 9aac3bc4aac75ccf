use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

use super::traits::KeyValueStore;

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Store that keeps each key in its own file, `<root>/<key>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` as the storage directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        self.check_key(key)?;
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    fn check_key(&self, key: &str) -> Result<(), CoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if valid {
            Ok(())
        } else {
            Err(CoreError::Storage {
                backend: self.name().to_string(),
                message: format!("Invalid storage key '{key}'"),
            })
        }
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        String::from_utf8(bytes).map(Some).map_err(|e| {
            CoreError::Deserialization(format!("{} is not valid UTF-8: {e}", path.display()))
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        let tmp = path.with_extension(format!("{VALUE_EXTENSION}.{TMP_SUFFIX}"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
