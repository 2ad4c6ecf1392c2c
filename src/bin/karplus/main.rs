//! karplus - plucked-string chords in the terminal
//!
//! Run with: cargo run -- [G|A|D] [distort]

mod app;
mod ui;

use app::KarplusApp;
use color_eyre::eyre::eyre;
use karplus::{dsp::distortion::WaveShaper, synth::chord};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "D".to_string());
    let frequencies =
        chord::preset(&name).ok_or_else(|| eyre!("unknown chord {name:?}, expected G, A or D"))?;

    let mut app = KarplusApp::new().chord(frequencies).volume(1.0);
    if args.any(|arg| arg == "distort") {
        app = app.shaper(WaveShaper::classic());
    }
    app.run()
}
