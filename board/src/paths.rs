use std::path::PathBuf;

const APP_DIR_NAME: &str = "TodoBoard";

pub fn init_app_data_dir() -> Result<PathBuf, std::io::Error> {
    let app_data_path = app_data_dir_from(|key| std::env::var(key).ok()).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to determine app data directory",
        )
    })?;

    std::fs::create_dir_all(app_data_path.join("logs"))?;
    Ok(app_data_path)
}

fn app_data_dir_from(var: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(s) = var("APPDATA").filter(|s| !s.is_empty()) {
        Some(PathBuf::from(s).join(APP_DIR_NAME))
    } else {
        var("HOME")
            .filter(|s| !s.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}
