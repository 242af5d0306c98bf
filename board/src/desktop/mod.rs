//! OS desktop integration: the taskbar/dock icon and the default browser.
//!
//! Hooks talk to the [`Taskbar`] and [`Browser`] traits so they can run
//! against [`SystemDesktop`] in the binary and against fakes in tests.
//! Neither capability is forced into existence: a headless session or an
//! unsupported platform is reported as [`DesktopError::Unsupported`].

use crate::error::DesktopError;
use image::ImageFormat;
use std::ffi::OsString;
use std::io::ErrorKind;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod win32;

pub const ICON_CAPABILITY: &str = "taskbar icon";
pub const BROWSER_CAPABILITY: &str = "default browser";

/// Decoded application icon.
#[derive(Debug, Clone)]
pub struct IconImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    encoded: Vec<u8>,
}

impl IconImage {
    pub fn from_png(encoded: Vec<u8>) -> Result<Self, DesktopError> {
        let decoded = image::load_from_memory_with_format(&encoded, ImageFormat::Png)
            .map_err(|e| DesktopError::InvalidImage(e.to_string()))?
            .to_rgba8();
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            rgba: decoded.into_raw(),
            encoded,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The original PNG bytes, for platforms that decode themselves.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Pixels in the BGRA order GDI bitmaps expect.
    pub fn bgra(&self) -> Vec<u8> {
        let mut pixels = self.rgba.clone();
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        pixels
    }
}

/// set-application-icon capability
pub trait Taskbar {
    fn set_icon_image(&self, icon: &IconImage) -> Result<(), DesktopError>;
}

/// open-URL-in-default-browser capability
pub trait Browser {
    fn browse(&self, url: &str) -> Result<(), DesktopError>;
}

/// The platform's own desktop integration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDesktop;

impl Taskbar for SystemDesktop {
    fn set_icon_image(&self, icon: &IconImage) -> Result<(), DesktopError> {
        #[cfg(target_os = "macos")]
        {
            macos::set_icon_image(icon)
        }
        #[cfg(windows)]
        {
            win32::set_icon_image(icon)
        }
        #[cfg(not(any(target_os = "macos", windows)))]
        {
            let _ = icon;
            Err(DesktopError::unsupported(
                ICON_CAPABILITY,
                format!("no taskbar icon API on {}", std::env::consts::OS),
            ))
        }
    }
}

impl Browser for SystemDesktop {
    fn browse(&self, url: &str) -> Result<(), DesktopError> {
        if needs_display_server() && !has_desktop_session(|key| std::env::var_os(key)) {
            return Err(DesktopError::unsupported(
                BROWSER_CAPABILITY,
                "no desktop session (DISPLAY and WAYLAND_DISPLAY are unset)",
            ));
        }
        open::that(url).map_err(launch_error)
    }
}

fn needs_display_server() -> bool {
    cfg!(all(unix, not(target_os = "macos")))
}

fn has_desktop_session(var: impl Fn(&str) -> Option<OsString>) -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| var(key).is_some_and(|value| !value.is_empty()))
}

// NSApplicationActivationPolicy values.
#[cfg(any(target_os = "macos", test))]
const ACTIVATION_POLICY_REGULAR: isize = 0;
#[cfg(any(target_os = "macos", test))]
const ACTIVATION_POLICY_PROHIBITED: isize = 2;

/// The activation policy to switch to so the dock shows a tile for the icon.
/// Only a process with no dock presence at all is promoted.
#[cfg(any(target_os = "macos", test))]
fn dock_policy_for_icon(current: isize) -> Option<isize> {
    (current == ACTIVATION_POLICY_PROHIBITED).then_some(ACTIVATION_POLICY_REGULAR)
}

/// Records `current` in `slot` and hands back the handle it supersedes, if any.
#[cfg(any(windows, test))]
fn replace_applied(slot: &std::sync::atomic::AtomicIsize, current: isize) -> Option<isize> {
    match slot.swap(current, std::sync::atomic::Ordering::SeqCst) {
        0 => None,
        previous if previous == current => None,
        previous => Some(previous),
    }
}

fn launch_error(e: std::io::Error) -> DesktopError {
    match e.kind() {
        ErrorKind::PermissionDenied => DesktopError::denied(BROWSER_CAPABILITY, e.to_string()),
        ErrorKind::NotFound => DesktopError::unsupported(
            BROWSER_CAPABILITY,
            format!("no browser launcher available: {}", e),
        ),
        _ => DesktopError::Launch(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON_BYTES: &[u8] = include_bytes!("../../resources/images/todo.png");

    #[test]
    fn icon_image_decodes_bundled_png() {
        let icon = IconImage::from_png(ICON_BYTES.to_vec()).unwrap();
        assert_eq!((icon.width(), icon.height()), (32, 32));
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
        assert_eq!(icon.encoded(), ICON_BYTES);
    }

    #[test]
    fn icon_image_rejects_non_png_bytes() {
        let err = IconImage::from_png(b"not an image".to_vec()).unwrap_err();
        assert!(matches!(err, DesktopError::InvalidImage(_)));
    }

    #[test]
    fn bgra_swaps_red_and_blue() {
        let icon = IconImage {
            width: 2,
            height: 1,
            rgba: vec![1, 2, 3, 4, 5, 6, 7, 8],
            encoded: Vec::new(),
        };
        assert_eq!(icon.bgra(), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn desktop_session_requires_a_non_empty_display() {
        assert!(!has_desktop_session(|_| None));
        assert!(!has_desktop_session(|_| Some(OsString::new())));
        assert!(has_desktop_session(|key| {
            (key == "WAYLAND_DISPLAY").then(|| OsString::from("wayland-0"))
        }));
        assert!(has_desktop_session(|key| {
            (key == "DISPLAY").then(|| OsString::from(":0"))
        }));
    }

    #[test]
    fn repeated_icons_release_the_one_they_replace() {
        use std::sync::atomic::{AtomicIsize, Ordering};

        let slot = AtomicIsize::new(0);
        assert_eq!(replace_applied(&slot, 0x10), None);
        assert_eq!(replace_applied(&slot, 0x20), Some(0x10));
        assert_eq!(replace_applied(&slot, 0x30), Some(0x20));
        assert_eq!(slot.load(Ordering::SeqCst), 0x30);

        // Re-applying the same handle must not free the live icon.
        assert_eq!(replace_applied(&slot, 0x30), None);
    }

    #[test]
    fn only_processes_without_a_dock_tile_are_promoted() {
        assert_eq!(
            dock_policy_for_icon(ACTIVATION_POLICY_PROHIBITED),
            Some(ACTIVATION_POLICY_REGULAR)
        );
        assert_eq!(dock_policy_for_icon(ACTIVATION_POLICY_REGULAR), None);
        // Accessory apps chose to stay out of the dock.
        assert_eq!(dock_policy_for_icon(1), None);
    }

    #[test]
    fn launch_errors_map_to_failure_kinds() {
        let denied = launch_error(std::io::Error::new(ErrorKind::PermissionDenied, "sandbox"));
        assert!(matches!(denied, DesktopError::SecurityDenied { .. }));

        let missing = launch_error(std::io::Error::new(ErrorKind::NotFound, "xdg-open"));
        assert!(matches!(missing, DesktopError::Unsupported { .. }));

        let other = launch_error(std::io::Error::new(ErrorKind::Other, "exit status 3"));
        assert!(matches!(other, DesktopError::Launch(_)));
    }
}
