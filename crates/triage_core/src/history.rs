use crate::{CategoryFilter, HistoryRecord, HistoryStats, RequestId};

/// Records shown per history page.
pub const PAGE_SIZE: usize = 3;

/// Banner shown when the record list cannot be retrieved.
pub const HISTORY_LOAD_FAILED: &str = "failed to load email history";

/// Client-side history browser: holds one fetched record set and pages over it.
///
/// Only the response to the most recently issued request is accepted; earlier
/// ones are discarded when they arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBrowser {
    filter: CategoryFilter,
    records: Vec<HistoryRecord>,
    current_page: usize,
    loading: bool,
    error: Option<String>,
    stats: Option<HistoryStats>,
    pending_records: Option<RequestId>,
    pending_stats: Option<RequestId>,
}

impl Default for HistoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBrowser {
    pub fn new() -> Self {
        Self {
            filter: CategoryFilter::All,
            records: Vec::new(),
            current_page: 1,
            loading: false,
            error: None,
            stats: None,
            pending_records: None,
            pending_stats: None,
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Option<HistoryStats> {
        self.stats
    }

    /// Switch the filter. Returns `false` when it is already active and its
    /// last load did not fail, in which case nothing needs to be fetched.
    pub fn set_filter(&mut self, filter: CategoryFilter) -> bool {
        if self.filter == filter && self.error.is_none() {
            return false;
        }
        self.filter = filter;
        self.current_page = 1;
        true
    }

    /// Record that a record fetch was issued; it supersedes any earlier one.
    pub fn begin_load(&mut self, request_id: RequestId) {
        self.pending_records = Some(request_id);
        self.loading = true;
        self.error = None;
    }

    /// Apply a record fetch response. Returns `false` if it was superseded.
    pub fn apply_records(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<HistoryRecord>, String>,
    ) -> bool {
        if self.pending_records != Some(request_id) {
            return false;
        }
        self.pending_records = None;
        self.loading = false;
        self.current_page = 1;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(_) => {
                self.records.clear();
                self.error = Some(HISTORY_LOAD_FAILED.to_string());
            }
        }
        true
    }

    pub fn begin_stats(&mut self, request_id: RequestId) {
        self.pending_stats = Some(request_id);
    }

    /// Apply a stats response; `None` hides the counts.
    pub fn apply_stats(&mut self, request_id: RequestId, stats: Option<HistoryStats>) -> bool {
        if self.pending_stats != Some(request_id) {
            return false;
        }
        self.pending_stats = None;
        self.stats = stats;
        true
    }

    pub fn page_count(&self) -> usize {
        self.records.len().div_ceil(PAGE_SIZE)
    }

    /// Move to page `page`; out-of-range pages are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.page_count() {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn visible_slice(&self) -> &[HistoryRecord] {
        let start = ((self.current_page - 1) * PAGE_SIZE).min(self.records.len());
        let end = (start + PAGE_SIZE).min(self.records.len());
        &self.records[start..end]
    }
}
