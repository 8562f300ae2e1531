//! RIFF/WAVE header parsing for audio cue assets.
//!
//! Cue files use the canonical 44-byte header:
//!
//! ```text
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  total length - 8
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  fmt chunk length (16 for PCM)
//!     20     2  audio format (1 = PCM)
//!     22     2  channels
//!     24     4  sample rate
//!     28     4  byte rate
//!     32     2  block align
//!     34     2  bits per sample
//!     36     4  "data"
//!     40     4  data length in bytes
//! ```
//!
//! Only 16-bit PCM is accepted; the codec path plays `i16` samples.

/// Length of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

const PCM_FORMAT: u16 = 1;
const PCM_FMT_CHUNK_LEN: u32 = 16;

/// Errors returned while parsing a cue header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WavError {
    /// Fewer than [`HEADER_LEN`] bytes were supplied.
    Truncated,
    /// Missing `RIFF` / `WAVE` tags.
    NotRiffWave,
    /// Missing `fmt ` or `data` chunk at the canonical offset.
    UnexpectedChunk,
    /// Audio format is not uncompressed PCM.
    UnsupportedFormat,
    /// Sample depth other than 16 bits.
    UnsupportedBitDepth,
}

impl core::fmt::Display for WavError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated => f.write_str("WAV header truncated"),
            Self::NotRiffWave => f.write_str("not a RIFF/WAVE file"),
            Self::UnexpectedChunk => f.write_str("unexpected chunk layout in WAV header"),
            Self::UnsupportedFormat => f.write_str("WAV audio format is not PCM"),
            Self::UnsupportedBitDepth => f.write_str("WAV sample depth is not 16-bit"),
        }
    }
}

/// Parsed fields of a canonical PCM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WavHeader {
    /// Channel count (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample; always 16 after a successful parse.
    pub bits_per_sample: u16,
    /// Length of the sample data in bytes.
    pub data_len: u32,
}

impl WavHeader {
    /// Header for a 16-bit PCM stream.
    #[must_use]
    pub const fn pcm16(channels: u16, sample_rate: u32, data_len: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
            data_len,
        }
    }

    /// Parse the first [`HEADER_LEN`] bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, WavError> {
        if bytes.len() < HEADER_LEN {
            return Err(WavError::Truncated);
        }
        if bytes.get(0..4) != Some(b"RIFF".as_slice())
            || bytes.get(8..12) != Some(b"WAVE".as_slice())
        {
            return Err(WavError::NotRiffWave);
        }
        if bytes.get(12..16) != Some(b"fmt ".as_slice())
            || bytes.get(36..40) != Some(b"data".as_slice())
        {
            return Err(WavError::UnexpectedChunk);
        }
        let fmt_len = le_u32(bytes, 16).ok_or(WavError::Truncated)?;
        let format = le_u16(bytes, 20).ok_or(WavError::Truncated)?;
        if fmt_len != PCM_FMT_CHUNK_LEN || format != PCM_FORMAT {
            return Err(WavError::UnsupportedFormat);
        }
        let bits_per_sample = le_u16(bytes, 34).ok_or(WavError::Truncated)?;
        if bits_per_sample != 16 {
            return Err(WavError::UnsupportedBitDepth);
        }

        Ok(Self {
            channels: le_u16(bytes, 22).ok_or(WavError::Truncated)?,
            sample_rate: le_u32(bytes, 24).ok_or(WavError::Truncated)?,
            bits_per_sample,
            data_len: le_u32(bytes, 40).ok_or(WavError::Truncated)?,
        })
    }

    /// Number of `i16` samples in the data chunk.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        (self.data_len / 2) as usize
    }

    /// Serialise back to the canonical 44-byte layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let block_align = self.channels.saturating_mul(self.bits_per_sample / 8);
        let byte_rate = self.sample_rate.saturating_mul(u32::from(block_align));
        let riff_len = self.data_len.saturating_add(36);

        let fields: [&[u8]; 13] = [
            b"RIFF",
            &riff_len.to_le_bytes(),
            b"WAVE",
            b"fmt ",
            &PCM_FMT_CHUNK_LEN.to_le_bytes(),
            &PCM_FORMAT.to_le_bytes(),
            &self.channels.to_le_bytes(),
            &self.sample_rate.to_le_bytes(),
            &byte_rate.to_le_bytes(),
            &block_align.to_le_bytes(),
            &self.bits_per_sample.to_le_bytes(),
            b"data",
            &self.data_len.to_le_bytes(),
        ];

        let mut out = [0u8; HEADER_LEN];
        for (dst, src) in out.iter_mut().zip(fields.iter().flat_map(|f| f.iter())) {
            *dst = *src;
        }
        out
    }
}

/// Parse the header of an in-memory cue and return it with its sample data.
///
/// The data slice starts right after the header and is clamped to the
/// shorter of `data_len` and the bytes actually present.
pub fn split(bytes: &[u8]) -> Result<(WavHeader, &[u8]), WavError> {
    let header = WavHeader::parse(bytes)?;
    let body = bytes.get(HEADER_LEN..).unwrap_or_default();
    let len = usize::try_from(header.data_len).map_or(body.len(), |n| n.min(body.len()));
    Ok((header, body.get(..len).unwrap_or_default()))
}

/// Decode little-endian 16-bit samples from `data` into `out`.
///
/// Returns the number of samples written: the lesser of `out.len()` and the
/// number of complete sample pairs in `data`.
pub fn decode_samples(data: &[u8], out: &mut [i16]) -> usize {
    let mut written = 0usize;
    for (dst, pair) in out.iter_mut().zip(data.chunks_exact(2)) {
        if let [lo, hi] = pair {
            *dst = i16::from_le_bytes([*lo, *hi]);
            written = written.saturating_add(1);
        }
    }
    written
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let raw = bytes.get(at..at.checked_add(2)?)?;
    Some(u16::from_le_bytes(raw.try_into().ok()?))
}

fn le_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at.checked_add(4)?)?;
    Some(u32::from_le_bytes(raw.try_into().ok()?))
}
