//! The "application ready" signal.
//!
//! The host registers hooks while it starts up and calls
//! [`Lifecycle::fire_ready`] once the listener is bound. `fire_ready`
//! consumes the lifecycle, so hooks see the signal exactly once.

use crate::error::DesktopError;
use log::{info, warn};
use std::io::Write;

/// Something to run once startup has completed.
pub trait ReadyHook {
    fn name(&self) -> &'static str;

    /// Failures are reported back to the lifecycle, never raised further.
    fn on_ready(&self) -> Result<(), DesktopError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadyReport {
    pub succeeded: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

#[derive(Default)]
pub struct Lifecycle {
    hooks: Vec<Box<dyn ReadyHook>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: impl ReadyHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every hook in registration order on the calling thread. Each
    /// failure is written as one line to `diagnostics` and logged.
    pub fn fire_ready(self, diagnostics: &mut dyn Write) -> ReadyReport {
        let mut report = ReadyReport::default();
        for hook in self.hooks {
            match hook.on_ready() {
                Ok(()) => report.succeeded.push(hook.name()),
                Err(e) => {
                    warn!("Ready hook {} failed: {}", hook.name(), e);
                    // Nowhere left to report a broken error stream.
                    let _ = writeln!(diagnostics, "{}: {}", hook.name(), e);
                    report.failed.push(hook.name());
                }
            }
        }
        info!(
            "Ready hooks finished: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        report
    }
}
