//! Uploaded pet photos on local disk.

use std::io;
use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

/// URL prefix under which stored photos are served.
pub const IMAGES_URL_PREFIX: &str = "/images/";

/// Longest extension kept from an uploaded file name.
const MAX_EXTENSION_LEN: usize = 10;

/// A photo received from the pet form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// File name as sent by the browser. Only its extension is kept.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Writes uploads to `<web_root>/images` and removes files referenced by
/// deleted pets.
#[derive(Debug, Clone)]
pub struct ImageStore {
    web_root: PathBuf,
}

impl ImageStore {
    /// Creates a store rooted at the public web root.
    #[must_use]
    pub fn new(web_root: impl Into<PathBuf>) -> Self {
        Self {
            web_root: web_root.into(),
        }
    }

    /// Directory receiving uploads.
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.web_root.join("images")
    }

    /// Stores `bytes` under a fresh random name that keeps only the
    /// extension of `original_name`, and returns the public reference
    /// (`/images/<name>`).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        let dir = self.images_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = match sanitized_extension(original_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(dir.join(&file_name), bytes).await?;
        tracing::info!(file = %file_name, size = bytes.len(), "pet photo stored");
        Ok(format!("{IMAGES_URL_PREFIX}{file_name}"))
    }

    /// Removes the file behind a site-relative `reference`.
    ///
    /// Returns `Ok(false)` when the reference does not resolve to a file
    /// inside the web root (missing file, `..` segments, URLs).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an existing file cannot be removed.
    pub async fn delete(&self, reference: &str) -> io::Result<bool> {
        let Some(path) = self.resolve(reference) else {
            tracing::debug!(reference, "image reference is not a local file");
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "pet photo removed");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let relative = reference.strip_prefix('/')?;
        if relative.is_empty() || relative.starts_with('/') || relative.contains('\\') {
            return None;
        }
        let relative = Path::new(relative);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.web_root.join(relative))
    }
}

/// Lower-cased alphanumeric extension of `file_name`, if it has a usable one.
fn sanitized_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    let ext: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!ext.is_empty() && ext.len() <= MAX_EXTENSION_LEN).then_some(ext)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(sanitized_extension("Rex.JPG"), Some("jpg".to_string()));
        assert_eq!(sanitized_extension("photo.tar.gz"), Some("gz".to_string()));
        assert_eq!(sanitized_extension("noext"), None);
        assert_eq!(sanitized_extension("weird.p-n_g"), Some("png".to_string()));
        assert_eq!(sanitized_extension("x.averyveryverylongext"), None);
    }

    #[tokio::test]
    async fn save_writes_under_images_with_random_name() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = ImageStore::new(dir.path());
        let Ok(reference) = store.save("../../etc/My Dog.PNG", b"png-bytes").await else {
            panic!("save failed");
        };

        assert!(reference.starts_with(IMAGES_URL_PREFIX));
        assert!(reference.ends_with(".png"));
        assert!(!reference.contains("My Dog"));
        let Some(name) = reference.strip_prefix(IMAGES_URL_PREFIX) else {
            panic!("bad prefix");
        };
        let written = tokio::fs::read(store.images_dir().join(name)).await;
        assert_eq!(written.ok(), Some(b"png-bytes".to_vec()));
    }

    #[tokio::test]
    async fn delete_removes_saved_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = ImageStore::new(dir.path());
        let Ok(reference) = store.save("cat.jpg", b"jpg").await else {
            panic!("save failed");
        };

        assert!(matches!(store.delete(&reference).await, Ok(true)));
        assert!(matches!(store.delete(&reference).await, Ok(false)));
    }

    #[tokio::test]
    async fn delete_ignores_non_local_references() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let outside = dir.path().join("secret.txt");
        assert!(tokio::fs::write(&outside, b"keep").await.is_ok());
        let web_root = dir.path().join("wwwroot");
        let store = ImageStore::new(&web_root);

        for reference in [
            "/../secret.txt",
            "//evil.example/x.png",
            "data:image/svg+xml;base64,AAAA",
            "https://example.com/a.png",
            "/images/./a.png",
        ] {
            assert!(matches!(store.delete(reference).await, Ok(false)), "{reference}");
        }
        assert!(outside.exists());
    }
}
