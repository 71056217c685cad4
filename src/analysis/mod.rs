pub mod bands;
pub mod classifier;
pub mod spectrum;
pub mod store;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::pcm::{deinterleave::deinterleave, PcmFormat};
use bands::BandSet;
use spectrum::SpectrumAnalyzer;
use store::{BlockResult, ResultStore};

/// Number of blocks the buffer splits into, counting a short final block.
pub fn block_count(total_bytes: usize, block_size: usize) -> usize {
    total_bytes.div_ceil(block_size)
}

/// Analyze a complete PCM buffer block by block, producing one BlockResult
/// per block per the configured block size.
///
/// The final block may be shorter than `block_size`; that is the normal end
/// of the buffer, and it still occupies one store slot so the playback
/// cursor's block arithmetic lines up with the bytes it consumes.
pub fn analyze(pcm: &[u8], format: &PcmFormat, block_size: usize) -> Result<ResultStore> {
    anyhow::ensure!(block_size >= format.frame_stride(), "block size {block_size} is smaller than one frame");

    let total_blocks = block_count(pcm.len(), block_size);
    let bands = BandSet::new(format.nyquist());
    let mut analyzer = SpectrumAnalyzer::new();
    let mut store = ResultStore::with_capacity(total_blocks);

    log::info!(
        "Analyzing {} bytes in {} blocks of {} bytes...",
        pcm.len(),
        total_blocks,
        block_size
    );

    let pb = ProgressBar::new(total_blocks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );

    for block in pcm.chunks(block_size) {
        let channels = deinterleave(block, format);
        let results = channels
            .iter()
            .map(|samples| {
                let transformed = analyzer.transform(samples);
                classifier::classify(&transformed, format.sample_rate, &bands)
            })
            .collect();
        store.push(BlockResult::new(results));
        pb.inc(1);
    }

    pb.finish_and_clear();
    log::info!("Analysis complete: {} blocks indexed", store.len());

    Ok(store)
}
