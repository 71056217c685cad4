mod analysis;
mod cli;
mod config;
mod error;
mod pcm;
mod playback;
mod render;

use anyhow::Result;
use clap::Parser;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use analysis::classifier;
use cli::Cli;
use playback::cursor::{Command, PlaybackCursor};
use playback::output::TickEvent;
use render::bars::BarRenderer;
use render::screen::StatsScreen;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect specplay.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("specplay.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("specplay").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("specplay").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.frames == 2048 { cli.frames = cfg.analysis.frames_per_block; }
            if cli.threshold == 1.0 { cli.threshold = cfg.display.char_threshold; }
            if cli.max_width == 120 { cli.max_width = cfg.display.max_bar_width; }
            if cli.marker == '|' { cli.marker = cfg.display.marker; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("specplay - terminal spectrum player");
    log::info!("Input: {}", cli.input.display());

    // 1. Locate the PCM payload
    let wav = pcm::wav::load_wav(&cli.input)?;
    let format = wav.format;
    let block_size = cli.frames * format.frame_stride();

    // 2. Analysis pass: the whole buffer is fingerprinted before any audio
    //    is emitted, so playback only ever reads precomputed results.
    let store = Arc::new(analysis::analyze(&wav.payload, &format, block_size)?);
    let duration = wav.payload.len() as f64
        / (format.sample_rate as usize * format.frame_stride()) as f64;
    log::info!("Indexed {} blocks, {:.1}s of audio", store.len(), duration);

    if cli.analyze_only {
        println!(
            "{}: {} blocks of {} bytes ({} frames each), {:.1}s total",
            cli.input.display(),
            store.len(),
            block_size,
            cli.frames,
            duration
        );
        return Ok(());
    }

    // 3. Playback: audio callback ticks the shared cursor and posts block
    //    indices; the render thread draws them; this thread reads commands.
    let renderer = BarRenderer::new(cli.threshold, cli.max_width, cli.marker);
    let screen = StatsScreen::new(&cli.input, &format, cli.frames);
    let pcm_bytes = Arc::new(wav.payload);
    let cursor = Arc::new(Mutex::new(PlaybackCursor::new(
        pcm_bytes.len(),
        block_size,
        format.sample_rate,
        cli.frames,
    )));
    let (events_tx, events_rx) = mpsc::channel();

    let output = playback::output::start(
        Arc::clone(&pcm_bytes),
        format,
        cli.frames,
        Arc::clone(&cursor),
        events_tx,
    )?;

    let render_store = Arc::clone(&store);
    let render_cursor = Arc::clone(&cursor);
    let render_thread = std::thread::spawn(move || {
        for event in events_rx {
            match event {
                TickEvent::Block(index) => {
                    let block = match render_store.get(index) {
                        Ok(block) => block,
                        Err(err) => {
                            // A cursor invariant was violated; stop playback
                            // rather than displaying stale data.
                            log::error!("{err}; stopping playback");
                            if let Ok(mut c) = render_cursor.lock() {
                                let _ = c.apply(Command::Pause);
                            }
                            break;
                        }
                    };
                    let peak_db = classifier::display_peak_db(block);
                    let remaining = render_cursor.lock().map(|c| c.remaining()).unwrap_or(0);
                    let lines = renderer.display_lines(block);
                    if let Err(err) = screen.draw(remaining, peak_db, &lines) {
                        log::warn!("Display error: {err}");
                    }
                }
                TickEvent::Finished => {
                    let _ = screen.draw_finished();
                }
            }
        }
    });

    if let Ok(mut c) = cursor.lock() {
        let _ = c.apply(Command::Start);
    }

    // Transport command loop: one command per line on stdin.
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed == "q" {
            break;
        }
        let Some(command) = parse_command(trimmed) else {
            if !trimmed.is_empty() {
                eprintln!("Unknown command: {trimmed}");
            }
            continue;
        };
        if let Ok(mut c) = cursor.lock() {
            if let Err(err) = c.apply(command) {
                eprintln!("Command rejected: {err}");
            }
        }
    }

    drop(output);
    let _ = render_thread.join();
    log::info!("Done");
    Ok(())
}

/// Parse one transport command line: s, p, r, q, b <sec>, f <sec>.
fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "s" => Some(Command::Start),
        "p" => Some(Command::Pause),
        "r" => Some(Command::Restart),
        "b" => parts.next()?.parse().ok().map(Command::Rewind),
        "f" => parts.next()?.parse().ok().map(Command::FastForward),
        _ => None,
    }
}
