use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use std::path::Path;

use crate::pcm::{PcmFormat, BYTES_PER_SAMPLE};

const KEY_HELP: &str = "Press: \n\
    s to start\n\
    p to pause\n\
    r to restart\n\
    q to quit\n\
    b <sec> to rewind\n\
    f <sec> to fast forward";

/// Stats page shown above the spectrum while audio plays.
pub struct StatsScreen {
    path: String,
    sample_rate: u32,
    frames_per_block: usize,
    bytes_per_second: f64,
}

impl StatsScreen {
    pub fn new(path: &Path, format: &PcmFormat, frames_per_block: usize) -> Self {
        Self {
            path: path.display().to_string(),
            sample_rate: format.sample_rate,
            frames_per_block,
            bytes_per_second: (format.sample_rate as usize
                * format.channels.count()
                * BYTES_PER_SAMPLE) as f64,
        }
    }

    /// Redraw the whole page for one playback tick.
    pub fn draw(&self, remaining_bytes: usize, peak_db: f64, bar_lines: &[String]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        execute!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        writeln!(out, "FILE_PATH : {}\r\n", self.path)?;
        for line in KEY_HELP.lines() {
            writeln!(out, "{line}\r")?;
        }
        writeln!(out, "\r")?;
        writeln!(out, "Sample Rate : {}\r", self.sample_rate)?;
        writeln!(out, "Frames per Block : {}\r", self.frames_per_block)?;
        writeln!(
            out,
            "Time Remaining (sec) : {:.2}\r",
            remaining_bytes as f64 / self.bytes_per_second
        )?;
        writeln!(out, "Peak Magn. (dB) : {peak_db:.2}\r")?;
        writeln!(out, "=============================================================\r")?;

        for line in bar_lines {
            writeln!(out, "{line}\r")?;
        }
        out.flush()
    }

    /// Final message once the buffer is exhausted.
    pub fn draw_finished(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "\rPlayback finished. Press r to restart or q to quit.\r"
        )?;
        out.flush()
    }
}
