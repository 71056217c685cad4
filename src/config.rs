use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_frames")]
    pub frames_per_block: usize,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_threshold")]
    pub char_threshold: f64,
    #[serde(default = "default_max_width")]
    pub max_bar_width: usize,
    #[serde(default = "default_marker")]
    pub marker: char,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frames_per_block: default_frames(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            char_threshold: default_threshold(),
            max_bar_width: default_max_width(),
            marker: default_marker(),
        }
    }
}

fn default_frames() -> usize { 2048 }
fn default_threshold() -> f64 { 1.0 }
fn default_max_width() -> usize { 120 }
fn default_marker() -> char { '|' }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("[display]\nchar_threshold = 2.5\n").unwrap();
        assert_eq!(cfg.display.char_threshold, 2.5);
        assert_eq!(cfg.display.max_bar_width, 120);
        assert_eq!(cfg.analysis.frames_per_block, 2048);
    }
}
