use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::pcm::{Endianness, PcmFormat, BYTES_PER_SAMPLE};
use super::cursor::{PlaybackCursor, TransportState};

/// Posted by the audio callback after every consumed block, and once when the
/// buffer runs out. Rendering happens on the receiving thread; the callback
/// itself never touches the terminal.
#[derive(Debug, PartialEq, Eq)]
pub enum TickEvent {
    Block(usize),
    Finished,
}

/// Keeps the cpal stream alive for the duration of playback.
pub struct AudioOutput {
    _stream: cpal::Stream,
}

/// Open the default output device and start the playback stream.
///
/// The device buffer is fixed at one analysis block's frames, so each data
/// callback requests exactly the chunk size the analysis pass used. Inside
/// the callback: lock the cursor, take one tick, copy the precomputed bytes,
/// zero-fill the rest. No I/O, no allocation beyond the mpsc send.
pub fn start(
    pcm: Arc<Vec<u8>>,
    format: PcmFormat,
    frames_per_block: usize,
    cursor: Arc<Mutex<PlaybackCursor>>,
    events: Sender<TickEvent>,
) -> Result<AudioOutput> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("No audio output device available")?;
    log::info!(
        "Output device: {}",
        device.name().unwrap_or_else(|_| "unknown".into())
    );

    let config = cpal::StreamConfig {
        channels: format.channels.count() as u16,
        sample_rate: cpal::SampleRate(format.sample_rate),
        buffer_size: cpal::BufferSize::Fixed(frames_per_block as u32),
    };

    let signed = format.signed;
    let endianness = format.endianness;
    let mut finished_sent = false;

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                let want = data.len() * BYTES_PER_SAMPLE;
                let (tick, state) = match cursor.lock() {
                    Ok(mut c) => (c.tick(want), c.state()),
                    Err(_) => {
                        data.fill(0);
                        return;
                    }
                };

                match tick {
                    Some(t) => {
                        let chunk = &pcm[t.offset..t.offset + t.len];
                        let filled = decode_samples(chunk, signed, endianness, data);
                        data[filled..].fill(0);
                        finished_sent = false;
                        let _ = events.send(TickEvent::Block(t.block_index));
                    }
                    None => {
                        data.fill(0);
                        if state == TransportState::Finished && !finished_sent {
                            finished_sent = true;
                            let _ = events.send(TickEvent::Finished);
                        }
                    }
                }
            },
            |err| log::error!("Audio stream error: {err}"),
            None,
        )
        .context("Failed to build audio output stream")?;

    stream.play().context("Failed to start audio output stream")?;

    Ok(AudioOutput { _stream: stream })
}

/// Decode raw PCM bytes into device samples, returning how many samples were
/// written. Unsigned input is re-centered around zero for the signed device
/// format.
fn decode_samples(chunk: &[u8], signed: bool, endianness: Endianness, out: &mut [i16]) -> usize {
    let mut written = 0;
    for (slot, bytes) in out.iter_mut().zip(chunk.chunks_exact(BYTES_PER_SAMPLE)) {
        let raw = match endianness {
            Endianness::Little => u16::from_le_bytes([bytes[0], bytes[1]]),
            Endianness::Big => u16::from_be_bytes([bytes[0], bytes[1]]),
        };
        *slot = if signed {
            raw as i16
        } else {
            (raw as i32 - 32768) as i16
        };
        written += 1;
    }
    written
}
