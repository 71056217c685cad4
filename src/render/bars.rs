use crate::analysis::bands::BAND_COUNT;
use crate::analysis::classifier::ChannelSpectrum;
use crate::analysis::store::BlockResult;

/// Turns banded dB values into fixed-width ASCII bars.
///
/// Pure text generation over already-computed data: the same BlockResult
/// always renders to the same strings.
pub struct BarRenderer {
    /// dB per marker glyph.
    char_threshold: f64,
    /// Cap on bar length, so a pathological dB value cannot produce an
    /// unbounded string.
    max_width: usize,
    marker: char,
}

impl BarRenderer {
    pub fn new(char_threshold: f64, max_width: usize, marker: char) -> Self {
        Self {
            char_threshold: char_threshold.max(f64::MIN_POSITIVE),
            max_width,
            marker,
        }
    }

    /// Bar length in glyphs for one band's dB value.
    fn bar_len(&self, db: f64) -> usize {
        let len = (db / self.char_threshold).floor();
        if len <= 0.0 {
            0
        } else {
            (len as usize).min(self.max_width)
        }
    }

    /// One bar string per band, low to high frequency.
    pub fn render_channel(&self, channel: &ChannelSpectrum) -> [String; BAND_COUNT] {
        std::array::from_fn(|band| {
            std::iter::repeat(self.marker)
                .take(self.bar_len(channel.band_db[band]))
                .collect()
        })
    }

    /// Labeled display lines for a whole block.
    ///
    /// The left channel renders its bands top-to-bottom low-to-high; the
    /// right channel renders the same bands bottom-to-top so the stereo image
    /// is mirrored around the center. Ordering happens here, on band indices,
    /// never by rearranging stored data.
    pub fn display_lines(&self, block: &BlockResult) -> Vec<String> {
        let mut lines = Vec::new();
        for (ch_index, channel) in block.channels().iter().enumerate() {
            let bars = self.render_channel(channel);
            for row in 0..BAND_COUNT {
                if ch_index == 0 {
                    lines.push(format!("L{row} {}", bars[row]));
                } else {
                    let band = BAND_COUNT - 1 - row;
                    lines.push(format!("R{band} {}", bars[band]));
                }
            }
            lines.push(String::new());
        }
        lines
    }
}
