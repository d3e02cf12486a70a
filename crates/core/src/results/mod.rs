//! Search result normalization and pagination.
//!
//! This module owns the canonical result record (`TorrentResult`), the
//! normalization of raw index responses into that record, and the
//! `ResultPager` that caches result sets per query and slices them into
//! display pages.

mod normalize;
mod pager;
mod types;

pub use normalize::normalize;
pub use pager::ResultPager;
pub use types::TorrentResult;
