//! Normalization of raw index responses into canonical records.
//!
//! The upstream service exists in several versions with drifting field names
//! (`date` vs `time`), numeric fields serialized as strings or numbers, and
//! a `data` key holding either a result array (search) or a single record
//! (detail lookup). Normalization adopts the union of those contracts: both
//! date field names are accepted, every field degrades to a documented
//! default, and this function never fails. An empty vec means "no results",
//! which is a valid outcome distinct from a transport error (raised by the
//! index adapter before normalization is ever reached).

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use super::types::{TorrentResult, UNKNOWN};

/// Output format for absolute timestamps. Input already in this shape is
/// reformatted to itself.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Convert a raw index response into canonical results.
///
/// Pure and total: no I/O, no error path. A missing, null or unrecognized
/// `data` key yields an empty vec.
pub fn normalize(raw: &Value) -> Vec<TorrentResult> {
    match raw.get("data") {
        Some(Value::Array(items)) => items.iter().map(normalize_record).collect(),
        Some(record @ Value::Object(_)) => vec![normalize_record(record)],
        _ => Vec::new(),
    }
}

/// Map one raw record to a `TorrentResult`, defaulting per field.
fn normalize_record(record: &Value) -> TorrentResult {
    // Older upstream versions report the date under `time`.
    let raw_date = record
        .get("date")
        .filter(|v| !v.is_null())
        .or_else(|| record.get("time"));

    TorrentResult {
        title: string_field(record, "title", UNKNOWN),
        download_link: string_field(record, "torrent", ""),
        size: string_field(record, "size", UNKNOWN),
        seeders: int_field(record, "seeders"),
        leechers: int_field(record, "leechers"),
        downloads: int_field(record, "completed"),
        category: string_field(record, "category", UNKNOWN),
        date: normalize_date(raw_date),
    }
}

fn string_field(record: &Value, key: &str, default: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn int_field(record: &Value, key: &str) -> u32 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Normalize the date field.
///
/// Relative strings ("3 hours ago") pass through unchanged. Absolute
/// timestamps are reformatted to `YYYY-MM-DD HH:MM`. Anything else becomes
/// "Unknown".
fn normalize_date(value: Option<&Value>) -> String {
    let Some(Value::String(raw)) = value else {
        return UNKNOWN.to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return UNKNOWN.to_string();
    }
    if raw.to_ascii_lowercase().contains("ago") {
        return raw.to_string();
    }
    match parse_timestamp(raw) {
        Some(timestamp) => timestamp.format(DATE_FORMAT).to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Parse an absolute timestamp in any of the formats the upstream versions
/// have been observed to emit.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| DateTime::parse_from_rfc2822(raw).map(|dt| dt.naive_utc()))
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_missing_data_key() {
        assert!(normalize(&json!({})).is_empty());
        assert!(normalize(&json!({"message": "ok"})).is_empty());
    }

    #[test]
    fn test_normalize_null_data() {
        assert!(normalize(&json!({"data": null})).is_empty());
    }

    #[test]
    fn test_normalize_empty_array() {
        assert!(normalize(&json!({"data": []})).is_empty());
    }

    #[test]
    fn test_normalize_unrecognized_data_shape() {
        assert!(normalize(&json!({"data": "oops"})).is_empty());
        assert!(normalize(&json!({"data": 42})).is_empty());
    }

    #[test]
    fn test_normalize_search_response() {
        let raw = json!({
            "data": [
                {
                    "title": "Show S01E01",
                    "torrent": "https://nyaa.si/download/1.torrent",
                    "size": "350 MiB",
                    "seeders": "42",
                    "leechers": 3,
                    "completed": "900",
                    "category": "Anime",
                    "date": "2024-06-15 10:30:00"
                },
                {
                    "title": "Show S01E02"
                }
            ]
        });

        let results = normalize(&raw);
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.title, "Show S01E01");
        assert_eq!(first.download_link, "https://nyaa.si/download/1.torrent");
        assert_eq!(first.seeders, 42);
        assert_eq!(first.leechers, 3);
        assert_eq!(first.downloads, 900);
        assert_eq!(first.date, "2024-06-15 10:30");

        let second = &results[1];
        assert_eq!(second.title, "Show S01E02");
        assert_eq!(second.download_link, "");
        assert_eq!(second.size, "Unknown");
        assert_eq!(second.seeders, 0);
        assert_eq!(second.category, "Unknown");
        assert_eq!(second.date, "Unknown");
    }

    #[test]
    fn test_normalize_detail_response() {
        let raw = json!({
            "data": {
                "title": "Single Release",
                "torrent": "https://nyaa.si/download/9.torrent",
                "time": "2023-01-05 08:00:00"
            }
        });

        let results = normalize(&raw);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Single Release");
        assert_eq!(results[0].date, "2023-01-05 08:00");
    }

    #[test]
    fn test_non_numeric_counts_default_to_zero() {
        let raw = json!({
            "data": [{
                "title": "x",
                "seeders": "many",
                "leechers": null,
                "completed": "12.5"
            }]
        });

        let results = normalize(&raw);
        assert_eq!(results[0].seeders, 0);
        assert_eq!(results[0].leechers, 0);
        assert_eq!(results[0].downloads, 0);
    }

    #[test]
    fn test_negative_count_defaults_to_zero() {
        let raw = json!({"data": [{"seeders": -3}]});
        assert_eq!(normalize(&raw)[0].seeders, 0);
    }

    #[test]
    fn test_date_field_preferred_over_time() {
        let raw = json!({
            "data": [{"date": "2024-02-01 12:00", "time": "2020-01-01 00:00"}]
        });
        assert_eq!(normalize(&raw)[0].date, "2024-02-01 12:00");
    }

    #[test]
    fn test_null_date_falls_back_to_time() {
        let raw = json!({
            "data": [{"date": null, "time": "2020-01-01 00:00"}]
        });
        assert_eq!(normalize(&raw)[0].date, "2020-01-01 00:00");
    }

    #[test]
    fn test_relative_date_passes_through() {
        let raw = json!({"data": [{"date": "3 hours ago"}]});
        assert_eq!(normalize(&raw)[0].date, "3 hours ago");

        let raw = json!({"data": [{"date": "2 Days Ago"}]});
        assert_eq!(normalize(&raw)[0].date, "2 Days Ago");
    }

    #[test]
    fn test_target_format_is_idempotent() {
        let raw = json!({"data": [{"date": "2024-06-15 10:30"}]});
        assert_eq!(normalize(&raw)[0].date, "2024-06-15 10:30");
    }

    #[test]
    fn test_rfc3339_date_reformatted() {
        let raw = json!({"data": [{"date": "2024-06-15T10:30:00Z"}]});
        assert_eq!(normalize(&raw)[0].date, "2024-06-15 10:30");
    }

    #[test]
    fn test_rfc2822_date_reformatted() {
        let raw = json!({"data": [{"date": "Sat, 15 Jun 2024 10:30:00 +0000"}]});
        assert_eq!(normalize(&raw)[0].date, "2024-06-15 10:30");
    }

    #[test]
    fn test_unparseable_date_becomes_unknown() {
        let raw = json!({"data": [{"date": "sometime last week"}]});
        assert_eq!(normalize(&raw)[0].date, "Unknown");

        let raw = json!({"data": [{"date": ""}]});
        assert_eq!(normalize(&raw)[0].date, "Unknown");

        let raw = json!({"data": [{"date": 1718445000}]});
        assert_eq!(normalize(&raw)[0].date, "Unknown");
    }

    #[test]
    fn test_numeric_title_rendered_as_string() {
        let raw = json!({"data": [{"title": 12345}]});
        assert_eq!(normalize(&raw)[0].title, "12345");
    }
}
