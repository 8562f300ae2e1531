//! Audio cue loading
//!
//! Both cues are decoded once at boot into caller-owned sample buffers, so
//! playback during a question never touches the asset store.

use platform::{wav, AssetKey, AssetStore, MemoryAssetStore, WavError, WavHeader};
use quiz::CueSet;

/// Sample capacity of one cue buffer (about 0.34 s at 48 kHz).
pub const CUE_CAPACITY: usize = 16_384;

/// Correct-answer jingle linked into the image.
pub static CORRECT_CUE_WAV: &[u8] = include_bytes!("../assets/correct_answer.wav");
/// Wrong-answer buzzer linked into the image.
pub static WRONG_CUE_WAV: &[u8] = include_bytes!("../assets/wrong_answer.wav");

/// Store over the cues linked into the image.
pub fn embedded_cues() -> MemoryAssetStore<'static> {
    MemoryAssetStore::new()
        .with(AssetKey::CorrectCue, CORRECT_CUE_WAV)
        .with(AssetKey::WrongCue, WRONG_CUE_WAV)
}

/// Bytes pulled from the store per read.
const CHUNK_BYTES: usize = 512;

/// Errors raised while loading a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CueError {
    /// The store could not read the asset.
    Unreadable(AssetKey),
    /// The asset is not a 16-bit PCM WAV file.
    Format(AssetKey, WavError),
    /// The cue holds more samples than its buffer.
    TooLong {
        /// Offending asset.
        key: AssetKey,
        /// Samples in the file.
        samples: usize,
        /// Samples the buffer can hold.
        capacity: usize,
    },
}

impl core::fmt::Display for CueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unreadable(key) => write!(f, "cannot read {}", key.file_name()),
            Self::Format(key, err) => write!(f, "{}: {err}", key.file_name()),
            Self::TooLong {
                key,
                samples,
                capacity,
            } => write!(
                f,
                "{} has {samples} samples, buffer holds {capacity}",
                key.file_name()
            ),
        }
    }
}

/// Decoded correct/wrong cues.
#[derive(Debug, Clone, Copy)]
pub struct CueLibrary<'a> {
    correct: &'a [i16],
    wrong: &'a [i16],
}

impl<'a> CueLibrary<'a> {
    /// Decode both cues from `store` into the given buffers.
    pub fn load<S: AssetStore>(
        store: &mut S,
        correct_buf: &'a mut [i16],
        wrong_buf: &'a mut [i16],
    ) -> Result<Self, CueError> {
        let correct_len = load_cue(store, AssetKey::CorrectCue, correct_buf)?;
        let wrong_len = load_cue(store, AssetKey::WrongCue, wrong_buf)?;

        let correct: &'a [i16] = correct_buf;
        let wrong: &'a [i16] = wrong_buf;
        Ok(Self {
            correct: correct.get(..correct_len).unwrap_or_default(),
            wrong: wrong.get(..wrong_len).unwrap_or_default(),
        })
    }

    /// Samples of the correct-answer jingle.
    pub fn correct(&self) -> &'a [i16] {
        self.correct
    }

    /// Samples of the wrong-answer buzzer.
    pub fn wrong(&self) -> &'a [i16] {
        self.wrong
    }

    /// The pair handed to the controller.
    pub fn cues(&self) -> CueSet<'a> {
        CueSet {
            correct: self.correct,
            wrong: self.wrong,
        }
    }
}

/// Decode one cue into `out`, returning the number of samples written.
pub fn load_cue<S: AssetStore>(
    store: &mut S,
    key: AssetKey,
    out: &mut [i16],
) -> Result<usize, CueError> {
    let mut head = [0u8; wav::HEADER_LEN];
    let got = store.read_asset(key, 0, &mut head).map_err(|err| {
        tracing::warn!(asset = key.file_name(), error = ?err, "asset read failed");
        CueError::Unreadable(key)
    })?;
    let header = WavHeader::parse(head.get(..got).unwrap_or_default())
        .map_err(|err| CueError::Format(key, err))?;

    let samples = header.sample_count();
    if samples > out.len() {
        return Err(CueError::TooLong {
            key,
            samples,
            capacity: out.len(),
        });
    }

    let mut chunk = [0u8; CHUNK_BYTES];
    let mut written = 0usize;
    let mut offset = wav::HEADER_LEN;
    while written < samples {
        let n = store.read_asset(key, offset, &mut chunk).map_err(|err| {
            tracing::warn!(asset = key.file_name(), error = ?err, "asset read failed");
            CueError::Unreadable(key)
        })?;
        if n == 0 {
            break;
        }
        let dst = out.get_mut(written..samples).unwrap_or_default();
        written = written.saturating_add(wav::decode_samples(
            chunk.get(..n).unwrap_or_default(),
            dst,
        ));
        offset = offset.saturating_add(n);
    }

    tracing::debug!(
        asset = key.file_name(),
        samples = written,
        rate = header.sample_rate,
        "cue loaded"
    );
    Ok(written)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    fn cue_bytes(samples: &[i16]) -> Vec<u8> {
        let data_len = u32::try_from(samples.len() * 2).unwrap();
        let mut bytes = WavHeader::pcm16(1, 48_000, data_len).to_bytes().to_vec();
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_load_decodes_both_cues() {
        let correct = cue_bytes(&[1, 2, 3]);
        let wrong = cue_bytes(&[-4, -5]);
        let mut store = MemoryAssetStore::new()
            .with(AssetKey::CorrectCue, &correct)
            .with(AssetKey::WrongCue, &wrong);
        let (mut a, mut b) = ([0i16; 8], [0i16; 8]);

        let library = CueLibrary::load(&mut store, &mut a, &mut b).unwrap();
        assert_eq!(library.correct(), &[1, 2, 3]);
        assert_eq!(library.cues().wrong, &[-4, -5]);
    }

    #[test]
    fn test_load_spans_multiple_chunks() {
        let samples: Vec<i16> = (0..700).collect();
        let bytes = cue_bytes(&samples);
        let mut store = MemoryAssetStore::new().with(AssetKey::WrongCue, &bytes);
        let mut out = [0i16; 1024];

        assert_eq!(load_cue(&mut store, AssetKey::WrongCue, &mut out).unwrap(), 700);
        assert_eq!(out[699], 699);
    }

    #[test]
    fn test_missing_cue_is_unreadable() {
        let correct = cue_bytes(&[1]);
        let mut store = MemoryAssetStore::new().with(AssetKey::CorrectCue, &correct);
        let (mut a, mut b) = ([0i16; 4], [0i16; 4]);

        let err = CueLibrary::load(&mut store, &mut a, &mut b).unwrap_err();
        assert_eq!(err, CueError::Unreadable(AssetKey::WrongCue));
    }

    #[test]
    fn test_non_wav_asset_is_rejected() {
        let junk = [0u8; 64];
        let mut store = MemoryAssetStore::new().with(AssetKey::CorrectCue, &junk);
        let mut out = [0i16; 4];

        assert_eq!(
            load_cue(&mut store, AssetKey::CorrectCue, &mut out),
            Err(CueError::Format(AssetKey::CorrectCue, WavError::NotRiffWave))
        );
    }

    #[test]
    fn test_cue_longer_than_buffer_is_rejected() {
        let bytes = cue_bytes(&[0; 10]);
        let mut store = MemoryAssetStore::new().with(AssetKey::CorrectCue, &bytes);
        let mut out = [0i16; 4];

        assert_eq!(
            load_cue(&mut store, AssetKey::CorrectCue, &mut out),
            Err(CueError::TooLong {
                key: AssetKey::CorrectCue,
                samples: 10,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_embedded_cues_fit_their_buffers() {
        let mut store = embedded_cues();
        let mut a = vec![0i16; CUE_CAPACITY];
        let mut b = vec![0i16; CUE_CAPACITY];

        let library = CueLibrary::load(&mut store, &mut a, &mut b).unwrap();
        assert!(!library.correct().is_empty());
        assert!(!library.wrong().is_empty());
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let msg = CueError::Unreadable(AssetKey::WrongCue).to_string();
        assert!(msg.contains("wrong_answer.wav"));
    }
}
