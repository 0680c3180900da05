use std::time::Duration;

/// Key presses the overlay distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Escape,
    Other,
}

/// Window-system input, reduced to what the overlay loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseRequested,
    KeyPressed(KeyPress),
    /// The window contents were invalidated and must be painted again.
    RedrawRequested,
}

/// Non-blocking source of pending input.
pub trait EventSource {
    /// Append every event that arrived since the last poll to `out`.
    fn poll(&mut self, out: &mut Vec<OverlayEvent>);
}

/// Frame pacing.
pub trait Clock {
    fn sleep(&mut self, interval: Duration);
}

/// Blocks the calling thread for the requested interval.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}
