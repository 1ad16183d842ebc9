//! Query state of the explore page.
//!
//! `QueryState` is the single source of truth for what the grid shows. Its
//! fields are read-only outside this crate; the search controller mutates it
//! through the `pub(crate)` transition methods below, each of which leaves
//! the state renderable.

use crate::model::{ProviderError, ResultItem};
use crate::provider::{FetchKind, FetchQuery, ResultPage};

// ===== ResultsPhase =====

/// What the results area should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsPhase {
    /// First page of a query is in flight.
    Loading,
    /// Last fetch failed and nothing is loaded.
    Error,
    /// Fetch finished with no matches.
    Empty,
    /// Items available.
    Ready,
}

// ===== QueryState =====

/// Search text, filter, pagination and loading state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    raw_text: String,
    category: Option<String>,
    /// Page-1 query of the live epoch. Load-more pages extend this one,
    /// not whatever text is waiting on the debounce.
    committed: FetchQuery,
    page: u32,
    page_size: usize,
    items: Vec<ResultItem>,
    total: usize,
    has_more: bool,
    loading_initial: bool,
    loading_more: bool,
    request_epoch: u64,
    last_error: Option<ProviderError>,
}

impl QueryState {
    /// Fresh state. A `page_size` of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            raw_text: String::new(),
            category: None,
            committed: FetchQuery::new(None, None, 1, page_size.max(1)),
            page: 1,
            page_size: page_size.max(1),
            items: Vec::new(),
            total: 0,
            has_more: false,
            loading_initial: false,
            loading_more: false,
            request_epoch: 0,
            last_error: None,
        }
    }

    // ===== Accessors =====

    /// Latest search text, lowercased.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Active category filter. `None` means all categories.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Last page requested for the live query (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Results accumulated across loaded pages.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Total matches reported by the last successful fetch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether a further page exists.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// First page of a query is in flight.
    pub fn loading_initial(&self) -> bool {
        self.loading_initial
    }

    /// A further page is in flight.
    pub fn loading_more(&self) -> bool {
        self.loading_more
    }

    /// Generation of the live query.
    pub fn request_epoch(&self) -> u64 {
        self.request_epoch
    }

    /// Text and category the loaded items were fetched with.
    ///
    /// Differs from [`Self::raw_text`] while typed text waits on the debounce.
    pub fn committed_query(&self) -> &FetchQuery {
        &self.committed
    }

    /// Error of the last failed fetch in the current epoch.
    pub fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    /// Whether the clear affordance should be enabled.
    pub fn clear_enabled(&self) -> bool {
        !self.raw_text.is_empty()
    }

    /// Whether a load-more request would be accepted right now.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading_more && !self.loading_initial
    }

    /// Render phase derived from flags and items.
    pub fn phase(&self) -> ResultsPhase {
        if self.loading_initial {
            ResultsPhase::Loading
        } else if self.items.is_empty() && self.last_error.is_some() {
            ResultsPhase::Error
        } else if self.items.is_empty() {
            ResultsPhase::Empty
        } else {
            ResultsPhase::Ready
        }
    }

    /// Query for `page` with the current text and category.
    pub fn query_for(&self, page: u32) -> FetchQuery {
        FetchQuery::new(
            Some(self.raw_text.as_str()),
            self.category.as_deref(),
            page,
            self.page_size,
        )
    }

    /// Query for `page` of the committed query.
    pub fn committed_query_for(&self, page: u32) -> FetchQuery {
        FetchQuery {
            page,
            ..self.committed.clone()
        }
    }

    fn recompute_has_more(&mut self) {
        self.has_more = (self.page as usize).saturating_mul(self.page_size) < self.total;
    }

    // ===== Transitions =====

    pub(crate) fn set_raw_text(&mut self, text: &str) {
        self.raw_text = text.to_lowercase();
    }

    pub(crate) fn set_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    /// Begin a new query: commit the current text and category, bump the
    /// epoch and reset results and pagination.
    ///
    /// Returns the new epoch.
    pub(crate) fn begin_query(&mut self) -> u64 {
        self.committed = self.query_for(1);
        self.request_epoch += 1;
        self.page = 1;
        self.items.clear();
        self.total = 0;
        self.has_more = false;
        self.loading_initial = true;
        self.loading_more = false;
        self.last_error = None;
        self.request_epoch
    }

    /// Begin loading the next page. Returns the page being requested, or
    /// `None` when load-more is not allowed.
    pub(crate) fn begin_load_more(&mut self) -> Option<u32> {
        if !self.can_load_more() {
            return None;
        }
        self.page += 1;
        self.loading_more = true;
        Some(self.page)
    }

    /// Apply a successful page for the current epoch.
    pub(crate) fn apply_page(&mut self, kind: FetchKind, page: ResultPage) {
        match kind {
            FetchKind::Initial => {
                self.items = page.items;
                self.loading_initial = false;
            }
            FetchKind::More => {
                self.items.extend(page.items);
                self.loading_more = false;
            }
        }
        self.total = page.total;
        self.last_error = None;
        self.recompute_has_more();
    }

    /// Apply a failed fetch for the current epoch.
    pub(crate) fn apply_failure(&mut self, kind: FetchKind, error: ProviderError) {
        match kind {
            FetchKind::Initial => {
                self.items.clear();
                self.total = 0;
                self.loading_initial = false;
            }
            FetchKind::More => {
                self.page = self.page.saturating_sub(1).max(1);
                self.loading_more = false;
            }
        }
        self.has_more = false;
        self.last_error = Some(error);
    }
}
