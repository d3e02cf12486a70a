use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Upstream index API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Index base URL (e.g. "https://nyaaapi.onrender.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://nyaaapi.onrender.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Torrent file download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Directory .torrent files are saved into
    #[serde(default = "default_downloads_dir")]
    pub directory: PathBuf,
    /// Connect timeout in seconds (no overall timeout: downloads may be slow)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_downloads_dir(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_connect_timeout() -> u32 {
    10
}

/// Result display configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Results per page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    10
}
