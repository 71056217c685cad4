use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "specplay", about = "Terminal PCM player with a precomputed ASCII spectrum display")]
pub struct Cli {
    /// Input WAV file (16-bit PCM, mono or stereo)
    pub input: PathBuf,

    /// Frames (samples per channel) analyzed per block
    #[arg(long, default_value_t = 2048)]
    pub frames: usize,

    /// dB represented by one bar glyph
    #[arg(long, default_value_t = 1.0)]
    pub threshold: f64,

    /// Maximum bar width in glyphs
    #[arg(long, default_value_t = 120)]
    pub max_width: usize,

    /// Glyph used to draw the bars
    #[arg(long, default_value_t = '|')]
    pub marker: char,

    /// Analyze and print a summary without opening an audio device
    #[arg(long)]
    pub analyze_only: bool,

    /// Explicit config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
