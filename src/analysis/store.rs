use crate::error::EngineError;

use super::classifier::ChannelSpectrum;

/// Per-block analysis results, one ChannelSpectrum per channel.
#[derive(Clone, Debug)]
pub struct BlockResult {
    channels: Vec<ChannelSpectrum>,
}

impl BlockResult {
    pub fn new(channels: Vec<ChannelSpectrum>) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> &[ChannelSpectrum] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelSpectrum> {
        self.channels.get(index)
    }
}

/// Block-indexed table of analysis results.
///
/// Built by the single-threaded analysis pass, which pushes blocks in order;
/// after that the store is shared behind an `Arc` and only read. The vector
/// index IS the block number, so it stays consistent with the playback
/// cursor's block arithmetic for the whole session.
#[derive(Debug, Default)]
pub struct ResultStore {
    blocks: Vec<BlockResult>,
}

impl ResultStore {
    pub fn with_capacity(blocks: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(blocks),
        }
    }

    /// Append the next block's result. Callers drive this strictly in block
    /// order; the new entry's index is the block number just analyzed.
    pub fn push(&mut self, result: BlockResult) {
        self.blocks.push(result);
    }

    /// Look up a block by index. An out-of-range index means a cursor
    /// invariant was violated, so the error is surfaced rather than clamped.
    pub fn get(&self, index: usize) -> Result<&BlockResult, EngineError> {
        self.blocks.get(index).ok_or(EngineError::BlockOutOfRange {
            index,
            limit: self.blocks.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
