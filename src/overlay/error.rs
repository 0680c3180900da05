use thiserror::Error;

/// Failures raised while creating or driving the overlay window.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("amplitude must be in 1..=127, got {0}")]
    Amplitude(u8),

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("event loop exited with code {0} before the window was ready")]
    EventLoopExited(i32),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),

    #[error("window handle is not a Win32 HWND")]
    UnsupportedHandle,

    #[cfg(windows)]
    #[error(transparent)]
    Win32(#[from] windows::core::Error),

    /// The window manager did not keep the requested extended style bits.
    #[error("extended style {requested:#010x} not applied (window reports {actual:#010x})")]
    StyleRejected { requested: u32, actual: u32 },

    #[error("no device context for the overlay window")]
    DeviceContext,

    #[error("console output: {0}")]
    Io(#[from] std::io::Error),
}
