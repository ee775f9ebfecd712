//! Image file storage
//!
//! Uploads land in `<public_dir>/schoolImages/` under a random name and are
//! referenced as `/schoolImages/<name>`. The public directory is served as
//! static files, so the reference is also the URL. Writes are staged in
//! `<public_dir>/.staging/`, which the static service never serves.

use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use tokio::fs;

use crate::error::StorageError;

/// Subdirectory of the public dir that holds uploaded images.
pub const IMAGE_SUBDIR: &str = "schoolImages";

/// Subdirectory of the public dir holding partial writes.
pub const STAGING_SUBDIR: &str = ".staging";

/// Extension used when the upload's filename has none we can trust.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Bytes of OS randomness per generated filename (hex-encoded to 16 chars).
const NAME_ENTROPY_BYTES: usize = 8;

/// Whether the image directory can take uploads right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageDirState {
    /// Exists and is not read-only
    Writable,
    /// Not created yet; the first upload creates it
    Missing,
    ReadOnly,
    /// Something other than a directory sits at the path
    NotADirectory,
    Unavailable,
}

impl ImageDirState {
    pub fn accepts_uploads(self) -> bool {
        matches!(self, Self::Writable | Self::Missing)
    }
}

/// Writes uploaded images under the public directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    public_dir: PathBuf,
}

impl ImageStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Directory images are written to.
    pub fn image_dir(&self) -> PathBuf {
        self.public_dir.join(IMAGE_SUBDIR)
    }

    /// Partial writes live here until renamed into `image_dir()`.
    pub fn staging_dir(&self) -> PathBuf {
        self.public_dir.join(STAGING_SUBDIR)
    }

    /// Inspect the image directory without creating it.
    pub async fn dir_state(&self) -> ImageDirState {
        match fs::metadata(self.image_dir()).await {
            Ok(meta) if !meta.is_dir() => ImageDirState::NotADirectory,
            Ok(meta) if meta.permissions().readonly() => ImageDirState::ReadOnly,
            Ok(_) => ImageDirState::Writable,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ImageDirState::Missing,
            Err(e) => {
                tracing::debug!(error = %e, "Image directory not inspectable");
                ImageDirState::Unavailable
            }
        }
    }

    /// Persist `bytes` under a fresh random name and return its reference path.
    ///
    /// The file is written under `staging_dir()` and renamed into place, so
    /// the reference never points at a partial write.
    pub async fn store(
        &self,
        bytes: &[u8],
        original_name: Option<&str>,
    ) -> Result<String, StorageError> {
        let dir = self.image_dir();
        let staging_dir = self.staging_dir();
        for d in [&dir, &staging_dir] {
            fs::create_dir_all(d)
                .await
                .map_err(|e| StorageError::io(d, e))?;
        }

        let filename = generate_filename(original_name);
        let dest = dir.join(&filename);
        let staging = staging_dir.join(format!("{}.part", filename));

        if let Err(e) = fs::write(&staging, bytes).await {
            let _ = fs::remove_file(&staging).await;
            return Err(StorageError::io(&staging, e));
        }
        fs::rename(&staging, &dest)
            .await
            .map_err(|e| StorageError::io(&dest, e))?;

        tracing::debug!(path = %dest.display(), size = bytes.len(), "Stored image");
        Ok(reference_path(&filename))
    }
}

/// `/schoolImages/<filename>`
pub fn reference_path(filename: &str) -> String {
    format!("/{}/{}", IMAGE_SUBDIR, filename)
}

/// Random 16-hex-char stem plus the extension of `original_name`.
pub fn generate_filename(original_name: Option<&str>) -> String {
    let mut entropy = [0u8; NAME_ENTROPY_BYTES];
    OsRng.fill_bytes(&mut entropy);

    let stem: String = entropy.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}.{}", stem, extension_of(original_name))
}

/// Extension of the client's filename, or `jpg` when absent, empty, or not
/// plain ASCII alphanumeric.
pub fn extension_of(original_name: Option<&str>) -> &str {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn extension_rules() {
        assert_eq!(extension_of(Some("logo.png")), "png");
        assert_eq!(extension_of(Some("archive.tar.GZ")), "GZ");
        assert_eq!(extension_of(Some("logo")), "jpg");
        assert_eq!(extension_of(Some("logo.")), "jpg");
        assert_eq!(extension_of(Some("logo.p%g")), "jpg");
        assert_eq!(extension_of(Some("")), "jpg");
        assert_eq!(extension_of(None), "jpg");
    }

    #[test]
    fn generated_names_are_hex_and_distinct() {
        let names: HashSet<String> = (0..100).map(|_| generate_filename(Some("a.png"))).collect();
        assert_eq!(names.len(), 100);

        for name in &names {
            let (stem, ext) = name.split_once('.').unwrap();
            assert_eq!(stem.len(), 16);
            assert!(stem.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
            assert_eq!(ext, "png");
        }
    }

    #[tokio::test]
    async fn store_creates_directory_and_writes_file() {
        let temp = TempDir::new().unwrap();
        let store = ImageStore::new(temp.path().join("public"));

        let reference = store.store(b"0123456789", Some("logo.png")).await.unwrap();
        assert!(reference.starts_with("/schoolImages/"));
        assert!(reference.ends_with(".png"));

        let filename = reference.rsplit('/').next().unwrap();
        let on_disk = std::fs::read(store.image_dir().join(filename)).unwrap();
        assert_eq!(on_disk, b"0123456789");

        let entries: Vec<_> = std::fs::read_dir(store.image_dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        // staged under the hidden dir, then moved out
        assert!(store.staging_dir().is_dir());
        assert_eq!(std::fs::read_dir(store.staging_dir()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn dir_state_tracks_image_directory() {
        let temp = TempDir::new().unwrap();
        let store = ImageStore::new(temp.path());
        assert_eq!(store.dir_state().await, ImageDirState::Missing);
        assert!(store.dir_state().await.accepts_uploads());

        store.store(b"data", Some("logo.png")).await.unwrap();
        assert_eq!(store.dir_state().await, ImageDirState::Writable);

        let blocked = TempDir::new().unwrap();
        std::fs::write(blocked.path().join(IMAGE_SUBDIR), b"occupied").unwrap();
        let store = ImageStore::new(blocked.path());
        assert_eq!(store.dir_state().await, ImageDirState::NotADirectory);
        assert!(!store.dir_state().await.accepts_uploads());
    }

    #[tokio::test]
    async fn same_original_name_never_collides() {
        let temp = TempDir::new().unwrap();
        let store = ImageStore::new(temp.path());

        let (a, b) = tokio::join!(
            store.store(b"first", Some("logo.png")),
            store.store(b"second", Some("logo.png")),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a, b);

        let read = |r: &str| std::fs::read(temp.path().join(r.trim_start_matches('/'))).unwrap();
        assert_eq!(read(&a), b"first");
        assert_eq!(read(&b), b"second");
    }

    #[tokio::test]
    async fn unwritable_directory_is_storage_error() {
        let temp = TempDir::new().unwrap();
        // a regular file where the image directory should be
        std::fs::write(temp.path().join(IMAGE_SUBDIR), b"occupied").unwrap();
        let store = ImageStore::new(temp.path());

        let err = store.store(b"data", Some("logo.png")).await.unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
