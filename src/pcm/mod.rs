pub mod deinterleave;
pub mod wav;

use crate::error::EngineError;

pub const BYTES_PER_SAMPLE: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn count(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    pub fn from_count(channels: u16) -> Result<Self, EngineError> {
        match channels {
            1 => Ok(ChannelLayout::Mono),
            2 => Ok(ChannelLayout::Stereo),
            other => Err(EngineError::UnsupportedChannels(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// Format descriptor for a raw 16-bit linear PCM byte buffer.
///
/// Everything the engine needs to know about the stream; the container layer
/// that produced it (WAV header walk, test fixture, ...) is not its concern.
#[derive(Clone, Copy, Debug)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: ChannelLayout,
    pub signed: bool,
    pub endianness: Endianness,
}

impl PcmFormat {
    /// Bytes occupied by one frame (one sample per channel).
    pub fn frame_stride(&self) -> usize {
        self.channels.count() * BYTES_PER_SAMPLE
    }

    /// Half the sample rate: the highest representable frequency.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }
}
