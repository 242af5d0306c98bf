use crate::desktop::Browser;
use crate::error::DesktopError;
use crate::lifecycle::ReadyHook;
use log::info;
use url::Url;

pub fn local_url(port: &str) -> String {
    format!("http://localhost:{}", port)
}

/// Opens the board in the user's default browser once the server listens.
pub struct BrowserOpener<B> {
    browser: B,
    port: String,
}

impl<B: Browser> BrowserOpener<B> {
    pub fn new(browser: B, port: impl Into<String>) -> Self {
        Self {
            browser,
            port: port.into(),
        }
    }

    /// Returns the URL handed to the browser.
    pub fn launch_browser(&self) -> Result<String, DesktopError> {
        let url = local_url(&self.port);
        if let Err(source) = Url::parse(&url) {
            return Err(DesktopError::MalformedUrl { url, source });
        }
        self.browser.browse(&url)?;
        info!("Opened {} in the default browser", url);
        Ok(url)
    }
}

impl<B: Browser> ReadyHook for BrowserOpener<B> {
    fn name(&self) -> &'static str {
        "browser"
    }

    fn on_ready(&self) -> Result<(), DesktopError> {
        self.launch_browser().map(|_| ())
    }
}
