//! Upstream torrent index access.
//!
//! `TorrentIndex` abstracts the REST API of a nyaa-style indexing service.
//! Implementations return the raw JSON response; converting it into
//! canonical records is the job of [`crate::results::normalize`], so all
//! transport and parse failures surface here, strictly before
//! normalization.

mod mock;
mod nyaa;

pub use mock::MockIndex;
pub use nyaa::NyaaApi;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Parameters for a free-text search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Free-text search query.
    pub query: String,
    /// Torrent category (default: "anime").
    pub category: String,
    /// Optional subcategory filter (e.g. "eng" for English-translated).
    pub subcategory: Option<String>,
    /// Upstream page number (the interactive pager slices locally, so this
    /// normally stays at 1).
    pub page: u32,
    /// Optional sort field.
    pub sort: Option<SortField>,
    /// Sort order (default: descending).
    pub order: SortOrder,
}

impl SearchParams {
    /// Search parameters with defaults for everything but the query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: "anime".to_string(),
            subcategory: None,
            page: 1,
            sort: None,
            order: SortOrder::Desc,
        }
    }
}

/// Parameters for a per-user search.
#[derive(Debug, Clone, Default)]
pub struct UserParams {
    /// Optional free-text query within the user's uploads.
    pub query: Option<String>,
    /// Optional category filter.
    pub category: Option<String>,
    /// Optional subcategory filter.
    pub subcategory: Option<String>,
}

/// Fields the upstream index can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Seeders,
    Leechers,
    Size,
    Downloads,
}

impl SortField {
    /// Wire name of the sort field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Seeders => "seeders",
            SortField::Leechers => "leechers",
            SortField::Size => "size",
            SortField::Downloads => "downloads",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "seeders" => Ok(SortField::Seeders),
            "leechers" => Ok(SortField::Leechers),
            "size" => Ok(SortField::Size),
            "downloads" => Ok(SortField::Downloads),
            other => Err(format!(
                "unknown sort field '{other}', expected one of: id, seeders, leechers, size, downloads"
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire name of the sort order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}', expected asc or desc")),
        }
    }
}

/// Errors that can occur talking to the upstream index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Index connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Index API error: {0}")]
    ApiError(String),

    #[error("Malformed index response: {0}")]
    MalformedResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for upstream index backends.
#[async_trait]
pub trait TorrentIndex: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Execute a free-text search.
    async fn search(&self, params: &SearchParams) -> Result<Value, IndexError>;

    /// List torrents uploaded by a user.
    async fn by_user(&self, username: &str, params: &UserParams) -> Result<Value, IndexError>;

    /// Fetch details for a single torrent by id.
    async fn by_id(&self, id: &str) -> Result<Value, IndexError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_round_trip() {
        for name in ["id", "seeders", "leechers", "size", "downloads"] {
            let field: SortField = name.parse().unwrap();
            assert_eq!(field.as_str(), name);
        }
    }

    #[test]
    fn test_sort_field_case_insensitive() {
        assert_eq!("Seeders".parse::<SortField>().unwrap(), SortField::Seeders);
    }

    #[test]
    fn test_sort_field_unknown() {
        let err = "popularity".parse::<SortField>().unwrap_err();
        assert!(err.contains("popularity"));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_search_params_defaults() {
        let params = SearchParams::new("one piece");
        assert_eq!(params.query, "one piece");
        assert_eq!(params.category, "anime");
        assert_eq!(params.page, 1);
        assert!(params.sort.is_none());
        assert_eq!(params.order, SortOrder::Desc);
    }
}
