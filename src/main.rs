#[cfg_attr(not(windows), allow(dead_code, unused_imports))]
mod overlay;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::overlay::OverlayConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Glasspane - semi-transparent overlay ===");

    run(OverlayConfig::default())
}

#[cfg(windows)]
fn run(config: OverlayConfig) -> Result<()> {
    use anyhow::Context;

    use crate::overlay::{OverlayController, OverlayWindow, SystemClock, Win32Surface};

    let mut window = OverlayWindow::open(&config).context("failed to open overlay window")?;
    let surface = Win32Surface::from_window(window.window())?;

    let mut controller = OverlayController::initialize(surface, config)
        .context("failed to make the overlay window layered")?;
    tracing::info!(period = controller.waveform().len(), "alpha waveform ready");
    controller.draw_static_scene()?;

    println!("Press 'q' to exit.");
    let mut stdout = std::io::stdout();
    let frames = controller.run_loop(&mut window, &mut SystemClock, &mut stdout)?;
    println!();
    tracing::debug!(frames, "exiting");
    Ok(())
}

#[cfg(not(windows))]
fn run(_config: OverlayConfig) -> Result<()> {
    anyhow::bail!("layered overlay windows require Windows")
}
