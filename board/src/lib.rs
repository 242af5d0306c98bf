//! Local host for the todo board plus the desktop hooks it runs once the
//! server is listening: the taskbar/dock icon and the default browser.

pub mod browser;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
pub mod icon;
pub mod lifecycle;
pub mod logger;
pub mod paths;
pub mod resources;
pub mod state;
pub mod web_server;

use crate::browser::BrowserOpener;
use crate::config::DesktopConfig;
use crate::desktop::{Browser, Taskbar};
use crate::icon::IconSetter;
use crate::lifecycle::Lifecycle;
use crate::resources::Resources;

/// Registers the desktop hooks enabled in `config`, icon first.
pub fn ready_hooks<D>(desktop: D, config: &DesktopConfig, resources: Resources, port: u16) -> Lifecycle
where
    D: Taskbar + Browser + Clone + 'static,
{
    let mut lifecycle = Lifecycle::new();
    if config.set_icon {
        lifecycle.register(IconSetter::with_resource(
            desktop.clone(),
            resources,
            config.icon_resource.clone(),
        ));
    }
    if config.open_browser {
        lifecycle.register(BrowserOpener::new(desktop, port.to_string()));
    }
    lifecycle
}
