use crate::error::StartupError;
use crate::resources::ICON_RESOURCE;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "board.json";
pub const PORT_ENV: &str = "BOARD_SERVER_PORT";
pub const DEFAULT_PORT: &str = "8080";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub desktop: DesktopConfig,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Either `"8080"` or `8080` in the file.
    #[serde(deserialize_with = "port_from_string_or_number")]
    pub port: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DesktopConfig {
    pub open_browser: bool,
    pub set_icon: bool,
    pub icon_resource: String,
    pub resource_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            desktop: DesktopConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            open_browser: true,
            set_icon: true,
            icon_resource: ICON_RESOURCE.to_string(),
            resource_dir: None,
        }
    }
}

impl Config {
    /// A missing file yields the defaults; an unreadable or invalid one is fatal.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(StartupError::Config(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&text)
            .map_err(|e| StartupError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var(PORT_ENV).filter(|p| !p.trim().is_empty()) {
            self.server.port = port.trim().to_string();
        }
    }
}

impl ServerConfig {
    pub fn bind_port(&self) -> Result<u16, StartupError> {
        self.port
            .trim()
            .parse()
            .map_err(|_| StartupError::Port(self.port.clone()))
    }
}

fn port_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u64),
        Text(String),
    }

    Ok(match PortValue::deserialize(deserializer)? {
        PortValue::Number(n) => n.to_string(),
        PortValue::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, "8080");
        assert!(config.desktop.open_browser);
        assert!(config.desktop.set_icon);
        assert_eq!(config.desktop.icon_resource, "images/todo.png");
    }

    #[test]
    fn port_accepts_number_or_string() {
        let numeric: Config = serde_json::from_str(r#"{"server":{"port":9000}}"#).unwrap();
        assert_eq!(numeric.server.port, "9000");

        let text: Config = serde_json::from_str(r#"{"server":{"port":"9001"}}"#).unwrap();
        assert_eq!(text.server.port, "9001");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"desktop":{"open_browser":false}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.desktop.open_browser);
        assert!(config.desktop.set_icon);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(StartupError::Config(_))));
    }

    #[test]
    fn env_overrides_file_port() {
        let mut config = Config::default();
        config.apply_env(|key| (key == PORT_ENV).then(|| " 9090 ".to_string()));
        assert_eq!(config.server.port, "9090");

        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.server.port, "9090");
    }

    #[test]
    fn bind_port_rejects_non_numeric_ports() {
        let mut server = ServerConfig::default();
        assert_eq!(server.bind_port().unwrap(), 8080);

        server.port = "abc".to_string();
        assert!(matches!(server.bind_port(), Err(StartupError::Port(p)) if p == "abc"));

        server.port = "70000".to_string();
        assert!(server.bind_port().is_err());
    }
}
