use crate::desktop::{IconImage, Taskbar};
use crate::error::DesktopError;
use crate::lifecycle::ReadyHook;
use crate::resources::{Resources, ICON_RESOURCE};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconOutcome {
    Applied,
    /// The asset is not shipped with this build; nothing was touched.
    ResourceMissing,
}

/// Sets the bundled board icon on the taskbar or dock once startup is done.
pub struct IconSetter<T> {
    taskbar: T,
    resources: Resources,
    logical_path: String,
}

impl<T: Taskbar> IconSetter<T> {
    pub fn new(taskbar: T, resources: Resources) -> Self {
        Self::with_resource(taskbar, resources, ICON_RESOURCE)
    }

    pub fn with_resource(taskbar: T, resources: Resources, logical_path: impl Into<String>) -> Self {
        Self {
            taskbar,
            resources,
            logical_path: logical_path.into(),
        }
    }

    pub fn set_icon(&self) -> Result<IconOutcome, DesktopError> {
        let Some(bytes) = self.resources.read(&self.logical_path)? else {
            debug!("Icon resource {} not bundled, skipping", self.logical_path);
            return Ok(IconOutcome::ResourceMissing);
        };
        let icon = IconImage::from_png(bytes)?;
        self.taskbar.set_icon_image(&icon)?;
        info!(
            "Application icon set from {} ({}x{})",
            self.logical_path,
            icon.width(),
            icon.height()
        );
        Ok(IconOutcome::Applied)
    }
}

impl<T: Taskbar> ReadyHook for IconSetter<T> {
    fn name(&self) -> &'static str {
        "icon"
    }

    fn on_ready(&self) -> Result<(), DesktopError> {
        self.set_icon().map(|_| ())
    }
}
