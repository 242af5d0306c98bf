use super::{replace_applied, IconImage, ICON_CAPABILITY};
use crate::error::DesktopError;
use std::ffi::c_void;
use std::sync::atomic::AtomicIsize;
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::Graphics::Gdi::{CreateBitmap, DeleteObject};
use windows::Win32::System::Console::GetConsoleWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateIconIndirect, DestroyIcon, GetWindowThreadProcessId, SendMessageW, HICON, ICONINFO,
    ICON_BIG, ICON_SMALL, WM_SETICON,
};

/// Handle of the icon currently attached to the console, 0 when none.
static APPLIED_ICON: AtomicIsize = AtomicIsize::new(0);

/// Sets the icon of the console window owned by this process. Windows has no
/// process-wide taskbar icon, and a console borrowed from the parent shell
/// must keep its own icon.
pub(super) fn set_icon_image(icon: &IconImage) -> Result<(), DesktopError> {
    let hwnd = unsafe { GetConsoleWindow() };
    if hwnd.0.is_null() {
        return Err(DesktopError::unsupported(
            ICON_CAPABILITY,
            "process has no console window",
        ));
    }
    let mut owner_pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut owner_pid as *mut u32)) };
    if owner_pid != std::process::id() {
        return Err(DesktopError::unsupported(
            ICON_CAPABILITY,
            "console window belongs to the parent process",
        ));
    }

    let width = icon.width() as i32;
    let height = icon.height() as i32;
    let color_bits = icon.bgra();
    // 1bpp rows are padded to 16 bits; an all-zero mask leaves alpha in charge.
    let mask_bits = vec![0u8; (icon.width() as usize).div_ceil(16) * 2 * icon.height() as usize];

    let hicon = unsafe {
        let color = CreateBitmap(width, height, 1, 32, Some(color_bits.as_ptr() as *const c_void));
        let mask = CreateBitmap(width, height, 1, 1, Some(mask_bits.as_ptr() as *const c_void));
        if color.0.is_null() || mask.0.is_null() {
            let _ = DeleteObject(color);
            let _ = DeleteObject(mask);
            return Err(DesktopError::unsupported(
                ICON_CAPABILITY,
                "CreateBitmap call failed",
            ));
        }
        let info = ICONINFO {
            fIcon: true.into(),
            xHotspot: 0,
            yHotspot: 0,
            hbmMask: mask,
            hbmColor: color,
        };
        let created = CreateIconIndirect(&info);
        let _ = DeleteObject(color);
        let _ = DeleteObject(mask);
        created.map_err(|e| DesktopError::unsupported(ICON_CAPABILITY, e.to_string()))?
    };

    unsafe {
        SendMessageW(
            hwnd,
            WM_SETICON,
            WPARAM(ICON_BIG as usize),
            LPARAM(hicon.0 as isize),
        );
        SendMessageW(
            hwnd,
            WM_SETICON,
            WPARAM(ICON_SMALL as usize),
            LPARAM(hicon.0 as isize),
        );
    }

    // Only icons created here are destroyed; the console's stock icon is left alone.
    if let Some(previous) = replace_applied(&APPLIED_ICON, hicon.0 as isize) {
        unsafe {
            let _ = DestroyIcon(HICON(previous as *mut c_void));
        }
    }
    Ok(())
}
