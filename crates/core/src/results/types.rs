//! Canonical search result record.

use serde::{Deserialize, Serialize};

/// Sentinel for fields the upstream index did not provide.
pub(crate) const UNKNOWN: &str = "Unknown";

/// A single normalized torrent entry.
///
/// Every field has a deterministic default, so a `TorrentResult` can always
/// be produced from a raw record no matter how incomplete or malformed the
/// upstream data is. Instances never mutate after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentResult {
    /// Display title ("Unknown" if absent upstream).
    pub title: String,
    /// Absolute URL to the .torrent file. May be empty.
    pub download_link: String,
    /// Human-readable size as reported upstream (no unit conversion).
    pub size: String,
    /// Seeder count (0 on absence or parse failure).
    pub seeders: u32,
    /// Leecher count (0 on absence or parse failure).
    pub leechers: u32,
    /// Completed download count (upstream field `completed`).
    pub downloads: u32,
    /// Category as reported upstream ("Unknown" if absent).
    pub category: String,
    /// Presentation date: relative strings pass through, absolute
    /// timestamps are reformatted to `YYYY-MM-DD HH:MM`, anything else
    /// becomes "Unknown".
    pub date: String,
}
