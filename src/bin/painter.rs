//! `painter`: Run canvas scripts through the execution loop.
//!
//! Each script file is compiled and posted as one batch, in argument
//! order, through the same interpreter session. With no files the script
//! is read from stdin. Presented frames are drawn on the terminal, or
//! summarized one line per frame with `--plain`.

use anyhow::{anyhow, Context as _};
use clap::Parser;
use crossbeam_channel::Receiver as FrameReceiver;
use painter::{
    ChannelReceiver, EventLoop, Interpreter, LoopConfig, Pixmap, PixmapFactory, Rgb,
    TerminalPresenter, TerminalSession,
};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Frames buffered between the loop and the presenter thread.
const FRAME_CHANNEL_CAPACITY: usize = 8;

#[derive(Parser, Debug)]
#[command(name = "painter", version, about = "Run canvas scripts through a double-buffered loop")]
struct Cli {
    /// Script files, posted in order. Reads stdin when none are given.
    scripts: Vec<PathBuf>,

    /// Pause between posting consecutive scripts, in milliseconds.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Keep the last frame on screen for this long, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    hold_ms: u64,

    /// Print one summary line per frame instead of drawing.
    #[arg(long)]
    plain: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scripts = load_scripts(&cli.scripts)?;

    let (receiver, frames) = ChannelReceiver::<Pixmap>::bounded(FRAME_CHANNEL_CAPACITY);
    let presenter = spawn_presenter(frames, cli.plain, Duration::from_millis(cli.hold_ms))?;
    let event_loop = EventLoop::start(LoopConfig::default(), &PixmapFactory, receiver)
        .context("failed to start the event loop")?;

    let mut interpreter = Interpreter::new();
    for (i, (name, text)) in scripts.iter().enumerate() {
        let batch = interpreter
            .parse(text)
            .with_context(|| format!("failed to parse {name}"))?;
        info!(script = %name, ops = batch.len(), presents = batch.presents(), "posting batch");
        event_loop.post_batch(batch);

        if cli.interval_ms > 0 && i + 1 < scripts.len() {
            thread::sleep(Duration::from_millis(cli.interval_ms));
        }
    }

    let stats = event_loop.stop();
    let shown = presenter
        .join()
        .map_err(|_| anyhow!("presenter thread panicked"))??;
    info!(applied = stats.applied, presented = stats.presented, shown, "done");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "painter=debug",
        _ => "painter=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read every script as `(display name, text)`.
fn load_scripts(paths: &[PathBuf]) -> anyhow::Result<Vec<(String, String)>> {
    if paths.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read script from stdin")?;
        return Ok(vec![("<stdin>".to_string(), text)]);
    }

    paths
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

/// Consume frames until the loop drops its sender. Returns frames shown.
fn spawn_presenter(
    frames: FrameReceiver<Pixmap>,
    plain: bool,
    hold: Duration,
) -> anyhow::Result<JoinHandle<anyhow::Result<u64>>> {
    let handle = thread::Builder::new()
        .name("painter-present".to_string())
        .spawn(move || {
            if plain {
                summarize_frames(&frames)
            } else {
                draw_frames(&frames, hold)
            }
        })
        .context("failed to spawn presenter thread")?;
    Ok(handle)
}

fn summarize_frames(frames: &FrameReceiver<Pixmap>) -> anyhow::Result<u64> {
    let mut stdout = io::stdout().lock();
    let mut shown = 0u64;
    for frame in frames {
        shown += 1;
        let size = frame.size();
        writeln!(
            stdout,
            "frame {shown}: {}x{} black={} white={} green={} red={}",
            size.width,
            size.height,
            frame.count(Rgb::BLACK),
            frame.count(Rgb::WHITE),
            frame.count(Rgb::GREEN),
            frame.count(Rgb::RED),
        )?;
    }
    Ok(shown)
}

fn draw_frames(frames: &FrameReceiver<Pixmap>, hold: Duration) -> anyhow::Result<u64> {
    let mut presenter = TerminalPresenter::from_terminal().context("failed to query terminal size")?;
    let _session = TerminalSession::enter().context("failed to set up the terminal")?;
    let mut stdout = io::stdout();

    for frame in frames {
        presenter.present(&frame, &mut stdout)?;
        debug!(frame = presenter.frames(), "frame drawn");
    }
    if presenter.frames() > 0 {
        thread::sleep(hold);
    }
    Ok(presenter.frames())
}
