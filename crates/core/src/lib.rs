pub mod config;
pub mod download;
pub mod index;
pub mod results;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, ApiConfig, Config,
    ConfigError, DisplayConfig, DownloadConfig,
};
pub use download::{sanitize_filename, DownloadError, TorrentDownloader};
pub use index::{
    IndexError, MockIndex, NyaaApi, SearchParams, SortField, SortOrder, TorrentIndex, UserParams,
};
pub use results::{normalize, ResultPager, TorrentResult};
