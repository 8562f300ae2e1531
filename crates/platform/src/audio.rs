//! Audio output abstraction

/// Blocking PCM sink.
///
/// [`play`](Self::play) returns only after every sample has been accepted by
/// the codec; callers do not proceed until playback completes.
pub trait AudioSink {
    /// Error type
    type Error: core::fmt::Debug;

    /// Play mono 16-bit samples (duplicated to both channels where the codec
    /// is stereo).
    fn play(&mut self, samples: &[i16]) -> Result<(), Self::Error>;
}
