use crate::config::Config;
use crate::resources::Resources;
use chrono::{DateTime, Local};
use std::path::PathBuf;

pub struct AppState {
    pub config: Config,
    pub board_url: String,
    pub resources: Resources,
    pub app_data_dir: PathBuf,
    pub started_at: DateTime<Local>,
}
