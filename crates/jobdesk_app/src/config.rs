use std::fs;
use std::path::Path;
use std::time::Duration;

use desk_logging::desk_warn;
use jobdesk_tms::ClientSettings;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "jobdesk.ron";

/// On-disk configuration; every field has a deployment default so a missing
/// or partial file still yields a working setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: usize,
    pub locale_id: u64,
    pub max_pages: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Session store exported from the authenticated browser session.
    pub session_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = ClientSettings::default();
        Self {
            base_url: settings.base_url,
            page_size: settings.page_size,
            locale_id: settings.locale_id,
            max_pages: settings.max_pages,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            session_file: "tms_session.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config file; absent falls back to defaults silently, an
    /// unparseable file falls back with a warning.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                desk_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };
        match ron::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                desk_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            page_size: self.page_size,
            locale_id: self.locale_id,
            max_pages: self.max_pages,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
