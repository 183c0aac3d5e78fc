use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use helmetwatch_client::config::{DEFAULT_BASE_URL, DEFAULT_DEVICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    System,
    Dark,
    Light,
}

impl Appearance {
    pub const ALL: &[Appearance] = &[Appearance::System, Appearance::Dark, Appearance::Light];
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::System => write!(f, "System"),
            Appearance::Dark => write!(f, "Dark"),
            Appearance::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backend base address, injected into the client at startup.
    pub backend_url: String,
    /// Camera index the backend should open for live sessions.
    pub device: u32,
    pub appearance: Appearance,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            device: DEFAULT_DEVICE,
            appearance: Appearance::System,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("HelmetWatch").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    fn load_from(path: &std::path::Path) -> Option<Self> {
        let json = fs::read_to_string(path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    fn save_to(&self, path: &std::path::Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn settings_round_trip_through_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.json");

        let settings = Settings {
            backend_url: "http://10.0.0.7:5000".to_string(),
            device: 2,
            appearance: Appearance::Dark,
        };
        settings.save_to(&path);

        let loaded = Settings::load_from(&path).expect("settings parse back");
        assert_eq!(loaded.backend_url, "http://10.0.0.7:5000");
        assert_eq!(loaded.device, 2);
        assert_eq!(loaded.appearance, Appearance::Dark);
    }

    #[test]
    fn corrupt_file_falls_back_to_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(Settings::load_from(&path).is_none());
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.backend_url, "http://localhost:5000");
        assert_eq!(settings.device, 0);
    }
}
