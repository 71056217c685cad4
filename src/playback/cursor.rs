use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    Playing,
    Paused,
    /// The buffer is exhausted; only Restart leaves this state.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Restart,
    Rewind(u32),
    FastForward(u32),
}

/// One chunk handed to the output device by a playback tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Byte range into the source buffer.
    pub offset: usize,
    pub len: usize,
    /// Store index of the block this chunk belongs to.
    pub block_index: usize,
}

/// Transport state machine tracking playback position through the source
/// buffer and the result store.
///
/// Every transition is an explicit method returning success or failure; the
/// audio callback and the command loop share one cursor behind a mutex, and
/// a pending seek takes effect at the next tick boundary.
#[derive(Debug)]
pub struct PlaybackCursor {
    state: TransportState,
    block_index: usize,
    byte_offset: usize,
    remaining: usize,
    total_bytes: usize,
    block_size: usize,
    total_blocks: usize,
    /// Seek granularity: analysis blocks per second of audio.
    cycles_per_second: usize,
}

impl PlaybackCursor {
    pub fn new(total_bytes: usize, block_size: usize, sample_rate: u32, frames_per_block: usize) -> Self {
        Self {
            state: TransportState::Paused,
            block_index: 0,
            byte_offset: 0,
            remaining: total_bytes,
            total_bytes,
            block_size,
            total_blocks: total_bytes.div_ceil(block_size),
            cycles_per_second: sample_rate as usize / frames_per_block.max(1),
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn block_index(&self) -> usize {
        self.block_index
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    /// Apply a transport command. Seeks pause playback, move the position,
    /// then resume; a rejected seek leaves the cursor untouched.
    pub fn apply(&mut self, command: Command) -> Result<(), EngineError> {
        match command {
            Command::Start => {
                if self.state != TransportState::Finished {
                    self.state = TransportState::Playing;
                }
                Ok(())
            }
            Command::Pause => {
                if self.state == TransportState::Playing {
                    self.state = TransportState::Paused;
                }
                Ok(())
            }
            Command::Restart => {
                self.block_index = 0;
                self.byte_offset = 0;
                self.remaining = self.total_bytes;
                self.state = TransportState::Playing;
                Ok(())
            }
            Command::Rewind(seconds) => self.rewind(seconds),
            Command::FastForward(seconds) => self.fast_forward(seconds),
        }
    }

    fn seek_delta(&self, seconds: u32) -> usize {
        seconds as usize * self.cycles_per_second
    }

    /// Reposition to the start of a block and resume playing.
    ///
    /// The byte offset is recomputed from the block index rather than moved
    /// by a symmetric byte delta: after a short final block the consumed
    /// offset is less than `block_index * block_size`, and a delta-based
    /// move would leave the audio position and the rendered block index
    /// pointing at different blocks. Only called with `block < total_blocks`,
    /// so the computed offset never passes the end of the buffer.
    fn seek_to(&mut self, block: usize) {
        self.block_index = block;
        self.byte_offset = block * self.block_size;
        self.remaining = self.total_bytes - self.byte_offset;
        self.state = TransportState::Playing;
    }

    fn rewind(&mut self, seconds: u32) -> Result<(), EngineError> {
        self.state = TransportState::Paused;
        let delta_blocks = self.seek_delta(seconds);

        if delta_blocks == 0 {
            self.state = TransportState::Playing;
            return Ok(());
        }
        if delta_blocks > self.block_index {
            // Rewinding past the start is the one documented clamp: it is a
            // full restart, not a partial rewind.
            return self.apply(Command::Restart);
        }

        self.seek_to(self.block_index - delta_blocks);
        Ok(())
    }

    fn fast_forward(&mut self, seconds: u32) -> Result<(), EngineError> {
        let was = self.state;
        self.state = TransportState::Paused;
        let delta_blocks = self.seek_delta(seconds);
        let target = self.block_index + delta_blocks;

        if target >= self.total_blocks {
            // Seeking past the last analyzed block is rejected, never
            // silently clamped; the cursor stays where it was.
            self.state = was;
            return Err(EngineError::SeekPastEnd {
                target,
                limit: self.total_blocks,
            });
        }

        self.seek_to(target);
        Ok(())
    }

    /// Consume up to `want` bytes for one output-device callback.
    ///
    /// Returns the byte range to copy plus the block index whose stored
    /// result should be rendered, or None when paused, finished, or empty.
    /// Consuming the last bytes transitions to Finished.
    pub fn tick(&mut self, want: usize) -> Option<Tick> {
        if self.state != TransportState::Playing || self.remaining == 0 {
            if self.remaining == 0 && self.state == TransportState::Playing {
                self.state = TransportState::Finished;
            }
            return None;
        }

        let len = want.min(self.remaining);
        let tick = Tick {
            offset: self.byte_offset,
            len,
            block_index: self.block_index,
        };

        self.byte_offset += len;
        self.remaining -= len;
        self.block_index += 1;
        if self.remaining == 0 {
            self.state = TransportState::Finished;
        }

        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10 blocks of 8 bytes at 1 block per second (rate 4, 4 frames/block).
    fn cursor() -> PlaybackCursor {
        let mut c = PlaybackCursor::new(80, 8, 4, 4);
        c.apply(Command::Start).unwrap();
        c
    }

    #[test]
    fn ticks_consume_every_byte_exactly_once() {
        let mut c = PlaybackCursor::new(20, 8, 4, 4);
        c.apply(Command::Start).unwrap();

        let mut consumed = 0;
        let mut blocks = Vec::new();
        while let Some(t) = c.tick(8) {
            assert_eq!(t.offset, consumed);
            consumed += t.len;
            blocks.push(t.block_index);
        }

        assert_eq!(consumed, 20);
        assert_eq!(blocks, vec![0, 1, 2]);
        // Final tick was the short block.
        assert_eq!(c.state(), TransportState::Finished);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn block_index_stays_inside_the_analyzed_range() {
        let mut c = cursor();
        while let Some(t) = c.tick(8) {
            assert!(t.block_index < c.total_blocks());
        }
    }

    #[test]
    fn paused_cursor_yields_nothing() {
        let mut c = cursor();
        c.apply(Command::Pause).unwrap();
        assert_eq!(c.state(), TransportState::Paused);
        assert!(c.tick(8).is_none());
        c.apply(Command::Start).unwrap();
        assert!(c.tick(8).is_some());
    }

    #[test]
    fn rewind_then_fast_forward_restores_position() {
        let mut c = cursor();
        for _ in 0..5 {
            c.tick(8);
        }
        let (block, offset) = (c.block_index(), c.byte_offset());

        c.apply(Command::Rewind(3)).unwrap();
        assert_eq!(c.block_index(), block - 3);
        assert_eq!(c.byte_offset(), offset - 24);

        c.apply(Command::FastForward(3)).unwrap();
        assert_eq!(c.block_index(), block);
        assert_eq!(c.byte_offset(), offset);
        assert_eq!(c.state(), TransportState::Playing);
    }

    #[test]
    fn fast_forward_to_block_count_is_rejected() {
        let mut c = cursor();
        for _ in 0..5 {
            c.tick(8);
        }
        // 5 more seconds lands exactly at block 10 == N.
        let err = c.apply(Command::FastForward(5)).unwrap_err();
        assert_eq!(err, EngineError::SeekPastEnd { target: 10, limit: 10 });
        // Cursor unchanged, still playable.
        assert_eq!(c.block_index(), 5);
        assert_eq!(c.byte_offset(), 40);
        assert_eq!(c.state(), TransportState::Playing);
    }

    #[test]
    fn rewind_past_start_restarts() {
        let mut c = cursor();
        for _ in 0..2 {
            c.tick(8);
        }
        c.apply(Command::Rewind(30)).unwrap();
        assert_eq!(c.block_index(), 0);
        assert_eq!(c.byte_offset(), 0);
        assert_eq!(c.remaining(), 80);
        assert_eq!(c.state(), TransportState::Playing);
    }

    // 20 bytes in 8-byte blocks: two full blocks plus a 4-byte final block.
    fn short_tail_cursor_at_finish() -> PlaybackCursor {
        let mut c = PlaybackCursor::new(20, 8, 4, 4);
        c.apply(Command::Start).unwrap();
        while c.tick(8).is_some() {}
        assert_eq!(c.state(), TransportState::Finished);
        c
    }

    #[test]
    fn rewind_to_start_over_a_short_final_block() {
        // After the short final block the consumed byte count (20) is less
        // than block_index * block_size (24); rewinding the full block count
        // must land cleanly at the start instead of underflowing the offset.
        let mut c = short_tail_cursor_at_finish();
        c.apply(Command::Rewind(3)).unwrap();
        assert_eq!(c.block_index(), 0);
        assert_eq!(c.byte_offset(), 0);
        assert_eq!(c.remaining(), 20);
        assert_eq!(c.state(), TransportState::Playing);
    }

    #[test]
    fn seeking_over_a_short_final_block_keeps_audio_and_blocks_aligned() {
        let mut c = short_tail_cursor_at_finish();
        c.apply(Command::Rewind(1)).unwrap();
        // Block 2's data starts at byte 16; the offset must follow the block
        // index, not a fixed byte delta from the short final position.
        assert_eq!(c.block_index(), 2);
        assert_eq!(c.byte_offset(), c.block_index() * 8);
        assert_eq!(c.remaining(), 4);

        // The next tick replays exactly the short final block.
        let t = c.tick(8).unwrap();
        assert_eq!(t, Tick { offset: 16, len: 4, block_index: 2 });
        assert_eq!(c.state(), TransportState::Finished);
    }

    #[test]
    fn zero_second_rewind_only_resumes() {
        let mut c = cursor();
        for _ in 0..3 {
            c.tick(8);
        }
        c.apply(Command::Pause).unwrap();
        c.apply(Command::Rewind(0)).unwrap();
        assert_eq!(c.block_index(), 3);
        assert_eq!(c.byte_offset(), 24);
        assert_eq!(c.state(), TransportState::Playing);
    }

    #[test]
    fn restart_revives_a_finished_cursor() {
        let mut c = cursor();
        while c.tick(8).is_some() {}
        assert_eq!(c.state(), TransportState::Finished);
        // Start alone does not resurrect a finished session.
        c.apply(Command::Start).unwrap();
        assert!(c.tick(8).is_none());

        c.apply(Command::Restart).unwrap();
        assert_eq!(c.remaining(), 80);
        assert_eq!(c.tick(8).unwrap().block_index, 0);
    }
}
