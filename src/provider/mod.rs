//! Result providers: the data boundary of the explore page.
//!
//! A [`ResultProvider`] answers one page of a query. It is synchronous and
//! `Send + Sync`; asynchrony lives in the [`dispatch`] layer, which runs
//! fetches off the event loop and hands completions back to the controller.

pub mod catalog;
pub mod dispatch;

pub use catalog::{FaultyProvider, MockCatalog};
pub use dispatch::{
    DeferredDispatcher, FetchCompletion, FetchDispatcher, FetchKind, FetchTicket,
    InlineDispatcher, ThreadedDispatcher,
};

use crate::model::{ProviderError, ResultItem};

// ===== FetchQuery =====

/// What to fetch: filters plus the page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    /// Free-text filter. `None` matches everything.
    pub text: Option<String>,
    /// Category (tag) filter. `None` means all categories.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: usize,
}

impl FetchQuery {
    /// Build a query, normalizing blank text to `None`.
    pub fn new(
        text: Option<&str>,
        category: Option<&str>,
        page: u32,
        page_size: usize,
    ) -> Self {
        let text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        Self {
            text,
            category: category.map(str::to_string),
            page,
            page_size,
        }
    }

    /// Offset of the first item of this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size)
    }
}

// ===== ResultPage =====

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    /// Items on this page, in catalogue order.
    pub items: Vec<ResultItem>,
    /// Total number of matches across all pages.
    pub total: usize,
    /// Whether a further page exists.
    pub has_more: bool,
}

// ===== ResultProvider =====

/// Source of explore results.
///
/// Implementations must tolerate concurrent calls: the controller may have an
/// outdated fetch outstanding while it issues a new one.
pub trait ResultProvider: Send + Sync {
    /// Fetch one page of matching items.
    fn fetch(&self, query: &FetchQuery) -> Result<ResultPage, ProviderError>;

    /// Distinct categories, sorted, for the filter chips.
    fn categories(&self) -> Vec<String>;
}

impl<P: ResultProvider + ?Sized> ResultProvider for std::sync::Arc<P> {
    fn fetch(&self, query: &FetchQuery) -> Result<ResultPage, ProviderError> {
        (**self).fetch(query)
    }

    fn categories(&self) -> Vec<String> {
        (**self).categories()
    }
}
