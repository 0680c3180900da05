pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod shell;
pub mod surface;
pub mod waveform;
#[cfg(windows)]
pub mod window;

pub use config::OverlayConfig;
pub use controller::OverlayController;
pub use events::SystemClock;
pub use shell::OverlayWindow;
#[cfg(windows)]
pub use window::Win32Surface;
