use std::ffi::c_void;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    CreateSolidBrush, DeleteObject, FillRect, GetDC, HDC, ReleaseDC,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetClientRect, GetWindowLongW, LWA_ALPHA, LWA_COLORKEY,
    SetLayeredWindowAttributes, SetWindowLongW, WS_EX_LAYERED,
};

use super::config::{Rect, Rgb};
use super::error::OverlayError;
use super::surface::{ExStyle, Scene, TransparencySurface};

const _: () = assert!(ExStyle::LAYERED.0 == WS_EX_LAYERED.0);

/// [`TransparencySurface`] backed by a Win32 window.
///
/// Holds a borrowed `HWND`; the window it came from must outlive the surface.
pub struct Win32Surface {
    hwnd: HWND,
}

impl Win32Surface {
    pub fn from_window(window: &impl HasWindowHandle) -> Result<Self, OverlayError> {
        match window.window_handle()?.as_raw() {
            RawWindowHandle::Win32(handle) => Ok(Self {
                hwnd: HWND(handle.hwnd.get() as *mut c_void),
            }),
            _ => Err(OverlayError::UnsupportedHandle),
        }
    }
}

impl TransparencySurface for Win32Surface {
    fn style(&self) -> Result<ExStyle, OverlayError> {
        let bits = unsafe { GetWindowLongW(self.hwnd, GWL_EXSTYLE) };
        Ok(ExStyle(bits as u32))
    }

    fn set_style(&mut self, style: ExStyle) -> Result<(), OverlayError> {
        unsafe {
            SetWindowLongW(self.hwnd, GWL_EXSTYLE, style.0 as i32);
        }

        // SetWindowLongW returns the previous value, so read back to confirm.
        let actual = self.style()?;
        if !actual.contains(style) {
            return Err(OverlayError::StyleRejected {
                requested: style.0,
                actual: actual.0,
            });
        }
        Ok(())
    }

    fn set_color_key_and_alpha(&mut self, key: Rgb, alpha: u8) -> Result<(), OverlayError> {
        unsafe {
            SetLayeredWindowAttributes(
                self.hwnd,
                COLORREF(key.colorref()),
                alpha,
                LWA_COLORKEY | LWA_ALPHA,
            )?;
        }
        Ok(())
    }

    fn present(&mut self, scene: &Scene) -> Result<(), OverlayError> {
        unsafe {
            let hdc = GetDC(Some(self.hwnd));
            if hdc.is_invalid() {
                return Err(OverlayError::DeviceContext);
            }
            let painted = paint(self.hwnd, hdc, scene);
            let _ = ReleaseDC(Some(self.hwnd), hdc);
            painted
        }
    }
}

unsafe fn paint(hwnd: HWND, hdc: HDC, scene: &Scene) -> Result<(), OverlayError> {
    unsafe {
        let mut client = RECT::default();
        GetClientRect(hwnd, &mut client)?;
        fill(hdc, &client, scene.background)?;

        for hole in &scene.holes {
            fill(hdc, &to_win32(hole), scene.key_color)?;
        }
        Ok(())
    }
}

unsafe fn fill(hdc: HDC, rect: &RECT, color: Rgb) -> Result<(), OverlayError> {
    unsafe {
        let brush = CreateSolidBrush(COLORREF(color.colorref()));
        if brush.is_invalid() {
            return Err(OverlayError::DeviceContext);
        }
        let _ = FillRect(hdc, rect, brush);
        let _ = DeleteObject(brush.into());
        Ok(())
    }
}

fn to_win32(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}
