use anyhow::{bail, Context, Result};
use std::path::Path;

use super::{ChannelLayout, Endianness, PcmFormat};

const WAVE_FORMAT_PCM: u16 = 1;

pub struct WavData {
    pub format: PcmFormat,
    pub payload: Vec<u8>,
}

/// Locate the raw sample payload of a RIFF/WAVE file.
///
/// This walks the chunk list far enough to read the `fmt ` descriptor and
/// find the `data` chunk; it does no decoding. Compressed formats and depths
/// other than 16-bit PCM are refused up front.
pub fn load_wav(path: &Path) -> Result<WavData> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read audio file: {}", path.display()))?;

    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        bail!("{} is not a RIFF/WAVE file", path.display());
    }

    let mut format: Option<PcmFormat> = None;
    let mut payload: Option<Vec<u8>> = None;

    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let size = u32::from_le_bytes(bytes[pos + 4..pos + 8].try_into().unwrap()) as usize;
        let body_start = pos + 8;
        let body_end = (body_start + size).min(bytes.len());
        let body = &bytes[body_start..body_end];

        match id {
            b"fmt " => format = Some(parse_fmt_chunk(body)?),
            b"data" => payload = Some(body.to_vec()),
            _ => {}
        }

        // Chunks are word aligned; odd sizes carry a pad byte.
        pos = body_start + size + (size & 1);
    }

    let format = format.context("WAV file has no fmt chunk")?;
    let payload = payload.context("WAV file has no data chunk")?;

    log::info!(
        "Loaded WAV: {} bytes of PCM, {}Hz, {} channel(s)",
        payload.len(),
        format.sample_rate,
        format.channels.count()
    );

    Ok(WavData { format, payload })
}

fn parse_fmt_chunk(body: &[u8]) -> Result<PcmFormat> {
    if body.len() < 16 {
        bail!("fmt chunk truncated ({} bytes)", body.len());
    }

    let audio_format = u16::from_le_bytes([body[0], body[1]]);
    if audio_format != WAVE_FORMAT_PCM {
        bail!("unsupported WAV format tag {audio_format}: only uncompressed PCM is handled");
    }

    let channels = u16::from_le_bytes([body[2], body[3]]);
    let sample_rate = u32::from_le_bytes(body[4..8].try_into().unwrap());
    let bits_per_sample = u16::from_le_bytes([body[14], body[15]]);

    if bits_per_sample != 16 {
        return Err(crate::error::EngineError::UnsupportedBitDepth(bits_per_sample).into());
    }

    Ok(PcmFormat {
        sample_rate,
        channels: ChannelLayout::from_count(channels)?,
        // 16-bit WAV data is signed little-endian by definition.
        signed: true,
        endianness: Endianness::Little,
    })
}
