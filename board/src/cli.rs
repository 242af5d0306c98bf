use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "board", version, about = "Serve the todo board locally and open it in the browser")]
pub struct Cli {
    /// Port to listen on, overrides `server.port` and BOARD_SERVER_PORT
    #[arg(short, long)]
    pub port: Option<String>,

    /// Config file (defaults to board.json in the app data directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not open the browser once the server is ready
    #[arg(long)]
    pub no_browser: bool,

    /// Do not set the taskbar/dock icon
    #[arg(long)]
    pub no_icon: bool,

    /// Extra directory searched first for bundled resources
    #[arg(long)]
    pub resource_dir: Option<PathBuf>,
}

impl Cli {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(port) = &self.port {
            config.server.port = port.clone();
        }
        if self.no_browser {
            config.desktop.open_browser = false;
        }
        if self.no_icon {
            config.desktop.set_icon = false;
        }
        if let Some(dir) = &self.resource_dir {
            config.desktop.resource_dir = Some(dir.clone());
        }
    }
}
