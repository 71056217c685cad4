use super::{ChannelLayout, Endianness, PcmFormat, BYTES_PER_SAMPLE};

/// Split a raw PCM byte block into per-channel normalized sample vectors.
///
/// Each returned vector holds `block.len() / frame_stride` samples in block
/// order. Signed samples are scaled by 1/32768, unsigned by 1/65535, so all
/// outputs land in roughly [-1.0, 1.0]. A trailing partial frame (block length
/// not a multiple of the frame stride) carries no complete sample for every
/// channel and is dropped.
pub fn deinterleave(block: &[u8], format: &PcmFormat) -> Vec<Vec<f64>> {
    let stride = format.frame_stride();
    let frames = block.len() / stride;
    let channels = format.channels.count();

    let mut out: Vec<Vec<f64>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();

    for frame in block.chunks_exact(stride) {
        for (ch, sample_bytes) in frame.chunks_exact(BYTES_PER_SAMPLE).enumerate() {
            out[ch].push(decode_sample(sample_bytes[0], sample_bytes[1], format));
        }
    }

    out
}

fn decode_sample(b0: u8, b1: u8, format: &PcmFormat) -> f64 {
    let raw = match format.endianness {
        Endianness::Little => u16::from_le_bytes([b0, b1]),
        Endianness::Big => u16::from_be_bytes([b0, b1]),
    };
    if format.signed {
        raw as i16 as f64 / 32768.0
    } else {
        raw as f64 / 65535.0
    }
}
