//! Read-only asset store abstraction
//!
//! Audio cues ship as RIFF/WAVE files. Firmware images link them in and serve
//! them from a [`MemoryAssetStore`]; the simulator can also read them from a
//! directory (`asset_local`). The game loop itself never touches the store:
//! boot copies each cue's samples into a caller-owned buffer (see
//! `firmware::audio::CueLibrary`).

/// Read-only store of named assets.
pub trait AssetStore {
    /// Error type
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes of `key` into `buf`, starting at
    /// `offset` within the asset.
    ///
    /// Returns the number of bytes actually read (may be less than
    /// `buf.len()` if `offset + buf.len() > asset_size(key)`).
    fn read_asset(
        &mut self,
        key: AssetKey,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error>;

    /// Return the size in bytes of `key`, or `Err` if the key is absent.
    fn asset_size(&mut self, key: AssetKey) -> Result<usize, Self::Error>;

    /// Return `true` if `key` is present in the store.
    fn asset_exists(&mut self, key: AssetKey) -> bool;
}

/// Catalogue of well-known asset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetKey {
    /// Jingle played after a correct answer.
    CorrectCue,
    /// Buzzer played after an incorrect answer.
    WrongCue,
}

impl AssetKey {
    /// File name of the asset.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::CorrectCue => "correct_answer.wav",
            Self::WrongCue => "wrong_answer.wav",
        }
    }
}

/// Error returned by [`MemoryAssetStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryAssetError {
    /// No asset registered under this key.
    Missing(AssetKey),
}

impl core::fmt::Display for MemoryAssetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "asset not found: {}", key.file_name()),
        }
    }
}

/// Asset store over borrowed byte slices.
///
/// Backs firmware images that link the cue files in with `include_bytes!`.
pub struct MemoryAssetStore<'a> {
    correct: Option<&'a [u8]>,
    wrong: Option<&'a [u8]>,
}

impl<'a> MemoryAssetStore<'a> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            correct: None,
            wrong: None,
        }
    }

    /// Register `bytes` under `key`, replacing any previous asset.
    #[must_use]
    pub const fn with(mut self, key: AssetKey, bytes: &'a [u8]) -> Self {
        match key {
            AssetKey::CorrectCue => self.correct = Some(bytes),
            AssetKey::WrongCue => self.wrong = Some(bytes),
        }
        self
    }

    fn lookup(&self, key: AssetKey) -> Result<&'a [u8], MemoryAssetError> {
        let slot = match key {
            AssetKey::CorrectCue => self.correct,
            AssetKey::WrongCue => self.wrong,
        };
        slot.ok_or(MemoryAssetError::Missing(key))
    }
}

impl Default for MemoryAssetStore<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore for MemoryAssetStore<'_> {
    type Error = MemoryAssetError;

    fn read_asset(
        &mut self,
        key: AssetKey,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let bytes = self.lookup(key)?;
        let Some(tail) = bytes.get(offset..) else {
            return Ok(0);
        };
        let n = tail.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), tail.get(..n)) {
            dst.copy_from_slice(src);
        }
        Ok(n)
    }

    fn asset_size(&mut self, key: AssetKey) -> Result<usize, Self::Error> {
        self.lookup(key).map(<[u8]>::len)
    }

    fn asset_exists(&mut self, key: AssetKey) -> bool {
        self.lookup(key).is_ok()
    }
}
