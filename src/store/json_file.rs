//! Whole-file JSON persistence shared by both stores.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::StoreError;

/// A JSON array file that is always read and written in full.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Creates a handle for the file at `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read and
    /// [`StoreError::Serialization`] if its content is not a valid array of
    /// `T`.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Option<Vec<T>>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let records = serde_json::from_slice(&bytes)?;
        Ok(Some(records))
    }

    /// Overwrites the file with the pretty-printed records, creating the
    /// parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on any filesystem failure.
    pub async fn save<T: Serialize>(&self, records: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let file = JsonFile::new(dir.path().join("absent.json"));
        let loaded = file.load::<u32>().await;
        assert!(matches!(loaded, Ok(None)));
    }

    #[tokio::test]
    async fn save_creates_parent_and_round_trips() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let file = JsonFile::new(dir.path().join("nested").join("numbers.json"));
        assert!(file.save(&[1u32, 2, 3]).await.is_ok());

        let Ok(Some(loaded)) = file.load::<u32>().await else {
            panic!("expected records");
        };
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn garbage_is_a_serialization_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("bad.json");
        assert!(tokio::fs::write(&path, b"{not json").await.is_ok());
        let loaded = JsonFile::new(path).load::<u32>().await;
        assert!(matches!(loaded, Err(StoreError::Serialization(_))));
    }
}
