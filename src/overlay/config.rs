use std::time::Duration;

/// An RGB color triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into the Win32 `COLORREF` layout (`0x00BBGGRR`).
    pub const fn colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

/// Axis-aligned rectangle in window pixels, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Fixed parameters of the overlay demo.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Half-height of the opacity triangle wave. The peak alpha is `2 * amplitude`.
    pub amplitude: u8,
    /// Color rendered fully transparent regardless of the window alpha.
    pub key_color: Rgb,
    /// Opaque fill behind the key-colored rectangles.
    pub background: Rgb,
    /// Regions punched through the overlay with the key color.
    pub holes: Vec<Rect>,
    /// Pause between frames.
    pub frame_interval: Duration,
    /// Key that ends the loop (matched case-insensitively).
    pub quit_key: char,
    pub title: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            amplitude: 50,
            key_color: Rgb::new(255, 0, 128),
            background: Rgb::new(0, 0, 0),
            holes: vec![Rect::new(400, 200, 100, 100), Rect::new(500, 300, 300, 200)],
            frame_interval: Duration::from_millis(15),
            quit_key: 'q',
            title: "Glasspane".to_string(),
        }
    }
}
