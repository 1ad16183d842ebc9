//! In-memory mock catalogue of Scambo posts.
//!
//! The seeded catalogue is embedded from `assets/posts.json`. Dates are stored
//! as "days ago" and resolved against a reference day at load time so the
//! relative labels stay meaningful.

use super::{FetchQuery, ResultPage, ResultProvider};
use crate::model::{CatalogError, ItemId, ProviderError, ResultItem};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

const SEEDED_POSTS: &str = include_str!("../../assets/posts.json");

/// Raw catalogue record as stored in JSON.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PostRecord {
    id: String,
    author: String,
    title: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    days_ago: u64,
}

// ===== MockCatalog =====

/// Static, in-memory result provider.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    items: Vec<ResultItem>,
}

impl MockCatalog {
    /// The ten seeded Scambo posts, dated relative to `today`.
    pub fn seeded(today: NaiveDate) -> Result<Self, CatalogError> {
        Self::from_json(SEEDED_POSTS, today)
    }

    /// Parse a catalogue from JSON records.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, empty ids, or duplicate ids.
    pub fn from_json(json: &str, today: NaiveDate) -> Result<Self, CatalogError> {
        let records: Vec<PostRecord> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let id = ItemId::new(record.id).map_err(|_| CatalogError::EmptyId { index })?;
            if !seen.insert(id.clone()) {
                return Err(CatalogError::DuplicateId {
                    id: id.as_str().to_string(),
                });
            }

            let posted_on = today
                .checked_sub_days(Days::new(record.days_ago))
                .unwrap_or(NaiveDate::MIN);
            let mut item = ResultItem::new(
                id,
                record.title,
                record.description,
                record.tags,
                record.author,
                posted_on,
            );
            if let Some(image) = record.image {
                item = item.with_image(image);
            }
            items.push(item);
        }

        Ok(Self { items })
    }

    /// Build a catalogue from ready-made items.
    pub fn from_items(items: Vec<ResultItem>) -> Self {
        Self { items }
    }

    /// Number of items in the catalogue.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalogue has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn matches(item: &ResultItem, query: &FetchQuery) -> bool {
        let text_ok = query
            .text
            .as_deref()
            .is_none_or(|needle| item.matches_text(needle));
        let category_ok = query
            .category
            .as_deref()
            .is_none_or(|category| item.has_tag(category));
        text_ok && category_ok
    }
}

impl ResultProvider for MockCatalog {
    fn fetch(&self, query: &FetchQuery) -> Result<ResultPage, ProviderError> {
        if query.page == 0 || query.page_size == 0 {
            return Err(ProviderError::InvalidPage {
                page: query.page,
                page_size: query.page_size,
            });
        }

        let matching: Vec<&ResultItem> = self
            .items
            .iter()
            .filter(|item| Self::matches(item, query))
            .collect();
        let total = matching.len();
        let items: Vec<ResultItem> = matching
            .into_iter()
            .skip(query.offset())
            .take(query.page_size)
            .cloned()
            .collect();
        let has_more = (query.page as usize).saturating_mul(query.page_size) < total;

        trace!(
            page = query.page,
            returned = items.len(),
            total,
            "Catalog page served"
        );

        Ok(ResultPage {
            items,
            total,
            has_more,
        })
    }

    fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.tags().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// ===== FaultyProvider =====

/// Wrapper that fails every `n`-th fetch, for exercising the error path.
#[derive(Debug)]
pub struct FaultyProvider<P> {
    inner: P,
    fail_every: NonZeroU32,
    calls: AtomicU32,
}

impl<P> FaultyProvider<P> {
    /// Fail every `fail_every`-th call to `fetch`.
    pub fn new(inner: P, fail_every: NonZeroU32) -> Self {
        Self {
            inner,
            fail_every,
            calls: AtomicU32::new(0),
        }
    }
}

impl<P: ResultProvider> ResultProvider for FaultyProvider<P> {
    fn fetch(&self, query: &FetchQuery) -> Result<ResultPage, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        if call % self.fail_every.get() == 0 {
            return Err(ProviderError::Unavailable {
                reason: format!("simulated failure on request {call}"),
            });
        }
        self.inner.fetch(query)
    }

    fn categories(&self) -> Vec<String> {
        self.inner.categories()
    }
}
