//! Per-query result cache and page navigation state.

use std::collections::HashMap;

use tracing::debug;

use super::types::TorrentResult;

/// Caches full result sets per query label and tracks the current page.
///
/// One pager instance lives for the duration of a CLI session and is only
/// ever touched sequentially: the command loop renders a page, waits for
/// user input, then navigates or resolves a selection. Page size is a
/// per-render parameter, not pager state, so the pager cannot (and does
/// not) bound `next_page` — rendering past the last page just yields an
/// empty window.
#[derive(Debug)]
pub struct ResultPager {
    current_page: usize,
    cache: HashMap<String, Vec<TorrentResult>>,
    current_window: Vec<TorrentResult>,
}

impl Default for ResultPager {
    fn default() -> Self {
        // A derived Default would start on page 0 and break the >= 1
        // invariant that render_page relies on.
        Self::new()
    }
}

impl ResultPager {
    /// Create a pager positioned on page 1 with an empty cache.
    pub fn new() -> Self {
        Self {
            current_page: 1,
            cache: HashMap::new(),
            current_window: Vec::new(),
        }
    }

    /// The 1-based current page number.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The slice of records most recently rendered.
    pub fn current_window(&self) -> &[TorrentResult] {
        &self.current_window
    }

    /// Store (or wholesale replace) the result set for a query label.
    ///
    /// Does not touch pagination: callers issuing a fresh search must call
    /// [`reset_pagination`](Self::reset_pagination) before the first render.
    pub fn cache_results(&mut self, label: impl Into<String>, results: Vec<TorrentResult>) {
        let label = label.into();
        debug!(label = %label, results = results.len(), "Caching result set");
        self.cache.insert(label, results);
    }

    /// Fetch a previously cached result set.
    pub fn lookup_cached(&self, label: &str) -> Option<&[TorrentResult]> {
        self.cache.get(label).map(Vec::as_slice)
    }

    /// Return to page 1.
    pub fn reset_pagination(&mut self) {
        self.current_page = 1;
    }

    /// Advance one page. Unbounded: there is no last-page check here, a
    /// subsequent render simply produces an empty window.
    pub fn next_page(&mut self) {
        self.current_page += 1;
    }

    /// Go back one page, stopping at page 1.
    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Number of pages needed for `total` results at `page_size` per page.
    ///
    /// Zero results means zero pages. `page_size` must be positive.
    pub fn page_count(total: usize, page_size: usize) -> usize {
        (total + page_size - 1) / page_size
    }

    /// Slice out the current page of `results` and remember it as the
    /// current selection window.
    ///
    /// Accepts any result sequence, not just a cached one; the cache is a
    /// side channel for later retrieval. A page past the end of `results`
    /// yields an empty (or short, for the final page) window rather than an
    /// error.
    pub fn render_page(&mut self, results: &[TorrentResult], page_size: usize) -> &[TorrentResult] {
        let start = (self.current_page - 1).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(results.len());
        self.current_window = if start >= results.len() {
            Vec::new()
        } else {
            results[start..end].to_vec()
        };
        &self.current_window
    }

    /// Resolve a 1-based selection against the current window.
    ///
    /// Returns the `(title, download_link)` pair, or `None` for an
    /// out-of-range ordinal — invalid selections are a user-input condition
    /// for the caller to report, not an error.
    pub fn resolve_selection(&self, ordinal: usize) -> Option<(String, String)> {
        if ordinal == 0 || ordinal > self.current_window.len() {
            return None;
        }
        let result = &self.current_window[ordinal - 1];
        Some((result.title.clone(), result.download_link.clone()))
    }
}
