use super::{dock_policy_for_icon, IconImage, ICON_CAPABILITY};
use crate::error::DesktopError;
use cocoa::base::{id, nil, BOOL, NO};
use cocoa::foundation::{NSAutoreleasePool, NSData};
use objc::{class, msg_send, sel, sel_impl};
use std::ffi::c_void;

/// Replaces the dock icon of the running application.
pub(super) fn set_icon_image(icon: &IconImage) -> Result<(), DesktopError> {
    unsafe {
        let main_thread: BOOL = msg_send![class!(NSThread), isMainThread];
        if main_thread == NO {
            return Err(DesktopError::unsupported(
                ICON_CAPABILITY,
                "the dock icon can only be changed from the main thread",
            ));
        }

        let pool = NSAutoreleasePool::new(nil);
        let bytes = icon.encoded();
        let data = NSData::dataWithBytes_length_(
            nil,
            bytes.as_ptr() as *const c_void,
            bytes.len() as u64,
        );
        let image: id = msg_send![class!(NSImage), alloc];
        let image: id = msg_send![image, initWithData: data];
        if image == nil {
            pool.drain();
            return Err(DesktopError::InvalidImage(
                "AppKit could not decode the icon".to_string(),
            ));
        }

        let app: id = msg_send![class!(NSApplication), sharedApplication];
        // An unbundled binary starts without a dock tile; give it one to carry the icon.
        let current: isize = msg_send![app, activationPolicy];
        if let Some(policy) = dock_policy_for_icon(current) {
            let _: BOOL = msg_send![app, setActivationPolicy: policy];
        }
        let _: () = msg_send![app, setApplicationIconImage: image];
        let _: () = msg_send![image, release];
        pool.drain();
    }
    Ok(())
}
