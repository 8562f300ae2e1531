//! Local filesystem asset store for the desktop simulator.
//!
//! `LocalAssetStore` implements [`AssetStore`] using `std::fs`. Each
//! [`AssetKey`] resolves to its [`file_name`](AssetKey::file_name) under the
//! directory given at construction.

use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;

use crate::asset_store::{AssetKey, AssetStore};

/// Error type for local filesystem operations.
#[derive(Debug)]
pub struct LocalAssetError(pub std::io::Error);

impl core::fmt::Display for LocalAssetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "local asset error: {}", self.0)
    }
}

impl std::error::Error for LocalAssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// An [`AssetStore`] backed by a directory on disk.
///
/// # Example
/// ```no_run
/// use platform::asset_local::LocalAssetStore;
/// use platform::{AssetKey, AssetStore};
/// let mut store = LocalAssetStore::new("/home/user/quiz-assets");
/// assert!(store.asset_exists(AssetKey::CorrectCue));
/// ```
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    /// Create a new store rooted at `dir`.
    #[must_use]
    pub fn new(dir: &str) -> Self {
        Self {
            root: PathBuf::from(dir),
        }
    }

    /// Create from the `QUIZ_ASSETS` environment variable.
    ///
    /// Returns `None` if `QUIZ_ASSETS` is not set or is not valid UTF-8.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("QUIZ_ASSETS").ok().map(|p| Self::new(&p))
    }

    fn resolve(&self, key: AssetKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

/// Log an I/O failure on `key` and wrap it.
fn io_failure(key: AssetKey, op: &'static str, err: io::Error) -> LocalAssetError {
    tracing::warn!(file = key.file_name(), op, error = %err, "asset I/O failed");
    LocalAssetError(err)
}

impl AssetStore for LocalAssetStore {
    type Error = LocalAssetError;

    fn read_asset(
        &mut self,
        key: AssetKey,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let start = u64::try_from(offset).map_err(|_| {
            io_failure(
                key,
                "seek",
                io::Error::new(io::ErrorKind::InvalidInput, "offset does not fit in u64"),
            )
        })?;
        let mut file = fs::File::open(self.resolve(key)).map_err(|e| io_failure(key, "open", e))?;
        file.seek(SeekFrom::Start(start))
            .map_err(|e| io_failure(key, "seek", e))?;
        let mut filled = 0usize;
        while let Some(rest) = buf.get_mut(filled..) {
            if rest.is_empty() {
                break;
            }
            let n = file.read(rest).map_err(|e| io_failure(key, "read", e))?;
            if n == 0 {
                break;
            }
            filled = filled.saturating_add(n);
        }
        Ok(filled)
    }

    fn asset_size(&mut self, key: AssetKey) -> Result<usize, Self::Error> {
        let meta = fs::metadata(self.resolve(key)).map_err(|e| io_failure(key, "metadata", e))?;
        Ok(usize::try_from(meta.len()).unwrap_or(usize::MAX))
    }

    fn asset_exists(&mut self, key: AssetKey) -> bool {
        self.resolve(key).is_file()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn local_store_reads_full_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("correct_answer.wav"), b"hello world").unwrap();
        let mut store = LocalAssetStore::new(tmp.path().to_str().unwrap());
        let mut buf = [0u8; 11];
        let n = store.read_asset(AssetKey::CorrectCue, 0, &mut buf).unwrap();
        assert_eq!(n, 11);
        assert_eq!(&buf, b"hello world");
    }

    #[test]
    fn local_store_reads_from_offset() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("wrong_answer.wav"), b"ABCDEFGH").unwrap();
        let mut store = LocalAssetStore::new(tmp.path().to_str().unwrap());
        let mut buf = [0u8; 8];
        let n = store.read_asset(AssetKey::WrongCue, 4, &mut buf).unwrap();
        assert_eq!(n, 4);
        assert_eq!(&buf[..4], b"EFGH");
    }

    #[test]
    fn local_store_size_matches() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("correct_answer.wav"), [0u8; 64]).unwrap();
        let mut store = LocalAssetStore::new(tmp.path().to_str().unwrap());
        assert_eq!(store.asset_size(AssetKey::CorrectCue).unwrap(), 64);
    }

    #[test]
    fn local_store_exists_false_for_missing_cue() {
        let tmp = TempDir::new().unwrap();
        let mut store = LocalAssetStore::new(tmp.path().to_str().unwrap());
        assert!(!store.asset_exists(AssetKey::WrongCue));
        assert!(store.asset_size(AssetKey::WrongCue).is_err());
    }

    #[test]
    fn local_store_read_of_missing_cue_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        let mut store = LocalAssetStore::new(tmp.path().to_str().unwrap());
        let mut buf = [0u8; 4];
        let err = store.read_asset(AssetKey::CorrectCue, 0, &mut buf).unwrap_err();
        assert_eq!(err.0.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("local asset error:"));
    }

    #[test]
    fn local_store_offset_past_end_reads_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("wrong_answer.wav"), b"ABCD").unwrap();
        let mut store = LocalAssetStore::new(tmp.path().to_str().unwrap());
        let mut buf = [0u8; 4];
        let n = store.read_asset(AssetKey::WrongCue, 1_000, &mut buf).unwrap();
        assert_eq!(n, 0);
    }
}
