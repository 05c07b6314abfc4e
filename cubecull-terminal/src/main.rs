/// CubeCull Terminal Demo - Rotating translucent cube
///
/// Controls:
///   - W/S: Rotate about X
///   - A/D: Rotate about Y
///   - Q/E: Rotate about Z
///   - Space: Pause/resume the spin
///   - R: Reset rotation
///   - Esc / Ctrl-C: Quit
use clap::Parser;
use cubecull_core::{AnimationParams, Mesh, RenderParams};
use cubecull_terminal::{TerminalApp, TerminalConfig};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "cubecull-terminal",
    version,
    about = "Rotating cube with soft hidden-surface blending"
)]
struct Args {
    /// Half-extent of the cube, in canvas units
    #[arg(long, default_value_t = 100.0)]
    half_extent: f32,

    /// Milliseconds between animation ticks
    #[arg(long, default_value_t = 30)]
    tick_ms: u64,

    /// Start with the spin paused
    #[arg(long)]
    paused: bool,

    /// Canvas units per terminal column
    #[arg(long, default_value_t = 8.0)]
    cell_width: f32,

    /// Canvas units per terminal row
    #[arg(long, default_value_t = 16.0)]
    cell_height: f32,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let animation = AnimationParams::default()
        .tick_interval(Duration::from_millis(args.tick_ms))
        .half_extent(args.half_extent);
    let render = RenderParams::default();
    for result in [animation.validate(), render.validate()] {
        result.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    }
    if !(args.cell_width > 0.0 && args.cell_height > 0.0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "cell size must be positive",
        ));
    }

    let config = TerminalConfig {
        render,
        animation,
        cell_width: args.cell_width,
        cell_height: args.cell_height,
        start_paused: args.paused,
    };

    tracing::info!(?config, "starting terminal renderer");

    let mut app = TerminalApp::new(Mesh::cube(animation.half_extent), config)?;
    app.run()
}
