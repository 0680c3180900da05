use std::ops::BitOr;

use super::config::{OverlayConfig, Rect, Rgb};
use super::error::OverlayError;

/// Extended window style bits (`GWL_EXSTYLE`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExStyle(pub u32);

impl ExStyle {
    /// `WS_EX_LAYERED`: the window is composited with a color key and/or global alpha.
    pub const LAYERED: Self = Self(0x0008_0000);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ExStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Static content painted onto the overlay: an opaque fill with key-colored holes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    pub background: Rgb,
    pub key_color: Rgb,
    pub holes: Vec<Rect>,
}

impl Scene {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            background: config.background,
            key_color: config.key_color,
            holes: config.holes.clone(),
        }
    }
}

/// Window capable of OS-level transparency.
///
/// The native implementation talks to the Win32 compositor; tests use an
/// in-memory recorder.
pub trait TransparencySurface {
    /// Current extended style bits.
    fn style(&self) -> Result<ExStyle, OverlayError>;

    fn set_style(&mut self, style: ExStyle) -> Result<(), OverlayError>;

    /// Make `key` fully transparent and apply `alpha` to everything else, in one call.
    fn set_color_key_and_alpha(&mut self, key: Rgb, alpha: u8) -> Result<(), OverlayError>;

    /// Paint `scene` and show it.
    fn present(&mut self, scene: &Scene) -> Result<(), OverlayError>;
}

#[cfg(test)]
pub use recording::RecordingSurface;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_keeps_existing_bits() {
        let before = ExStyle(0x0000_0108);
        let after = before | ExStyle::LAYERED;
        assert_eq!(after, ExStyle(0x0008_0108));
        assert!(after.contains(before));
        assert!(after.contains(ExStyle::LAYERED));
        assert!(!before.contains(ExStyle::LAYERED));
    }

    #[test]
    fn scene_mirrors_config() {
        let cfg = OverlayConfig::default();
        let scene = Scene::from_config(&cfg);
        assert_eq!(scene.key_color, Rgb::new(255, 0, 128));
        assert_eq!(scene.background, Rgb::new(0, 0, 0));
        assert_eq!(scene.holes, cfg.holes);
    }
}
