use std::time::Duration;

use tracing::{debug, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId, WindowLevel};

use super::config::OverlayConfig;
use super::error::OverlayError;
use super::events::{EventSource, KeyPress, OverlayEvent};

/// winit callbacks: creates the window once and queues translated input.
struct Shell {
    attributes: WindowAttributes,
    created: bool,
    window: Option<Window>,
    error: Option<winit::error::OsError>,
    pending: Vec<OverlayEvent>,
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.created {
            return;
        }
        self.created = true;

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                info!(size = ?window.inner_size(), "overlay window created");
                self.window = Some(window);
            }
            Err(e) => self.error = Some(e),
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let event = match event {
            WindowEvent::CloseRequested => OverlayEvent::CloseRequested,
            WindowEvent::RedrawRequested => OverlayEvent::RedrawRequested,
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                OverlayEvent::KeyPressed(key_press(&event.logical_key))
            }
            _ => return,
        };
        self.pending.push(event);
    }
}

fn key_press(key: &Key) -> KeyPress {
    match key {
        Key::Named(NamedKey::Escape) => KeyPress::Escape,
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyPress::Char(c),
                _ => KeyPress::Other,
            }
        }
        _ => KeyPress::Other,
    }
}

/// Borderless full-screen always-on-top window whose event loop is pumped
/// by the caller instead of owning the thread.
pub struct OverlayWindow {
    window: Window,
    shell: Shell,
    event_loop: EventLoop<()>,
}

impl OverlayWindow {
    /// Create the window, pumping the event loop until the platform hands it over.
    pub fn open(config: &OverlayConfig) -> Result<Self, OverlayError> {
        let mut event_loop = EventLoop::new()?;
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_decorations(false)
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
            .with_window_level(WindowLevel::AlwaysOnTop);

        let mut shell = Shell {
            attributes,
            created: false,
            window: None,
            error: None,
            pending: Vec::new(),
        };

        let window = loop {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut shell)
            {
                return Err(OverlayError::EventLoopExited(code));
            }
            if let Some(e) = shell.error.take() {
                return Err(e.into());
            }
            if let Some(window) = shell.window.take() {
                break window;
            }
        };

        Ok(Self {
            window,
            shell,
            event_loop,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl EventSource for OverlayWindow {
    fn poll(&mut self, out: &mut Vec<OverlayEvent>) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.shell);
        out.append(&mut self.shell.pending);

        if let PumpStatus::Exit(code) = status {
            debug!(code, "event loop exited");
            out.push(OverlayEvent::CloseRequested);
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::SmolStr;

    use super::*;

    #[test]
    fn character_keys_map_to_chars() {
        assert_eq!(key_press(&Key::Character(SmolStr::new("q"))), KeyPress::Char('q'));
        assert_eq!(key_press(&Key::Character(SmolStr::new("Q"))), KeyPress::Char('Q'));
    }

    #[test]
    fn escape_and_unknown_keys() {
        assert_eq!(key_press(&Key::Named(NamedKey::Escape)), KeyPress::Escape);
        assert_eq!(key_press(&Key::Named(NamedKey::Enter)), KeyPress::Other);
        assert_eq!(key_press(&Key::Character(SmolStr::new("qq"))), KeyPress::Other);
    }
}
