use thiserror::Error;

/// Failures surfaced by the analysis engine and playback cursor.
///
/// A short final block is not represented here: running out of bytes at the
/// end of the buffer is the normal end condition for both the analysis pass
/// and playback, not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unsupported channel count {0}: only mono and stereo PCM is handled")]
    UnsupportedChannels(u16),

    #[error("unsupported bit depth {0}: only 16-bit linear PCM is handled")]
    UnsupportedBitDepth(u16),

    #[error("seek target exceeds analyzed range (block {target} >= {limit})")]
    SeekPastEnd { target: usize, limit: usize },

    #[error("block index {index} outside analyzed range 0..{limit}")]
    BlockOutOfRange { index: usize, limit: usize },
}
