//! Search controller: the only code path that starts fetches.
//!
//! The controller owns [`QueryState`], the grid [`FocusNavigator`] and a
//! [`Debouncer`]. User intents (typing, submit, filter, clear, load-more) are
//! turned into state transitions plus [`FetchTicket`]s for the dispatcher.
//! Completions come back through [`SearchController::pump`] and are applied
//! only when their epoch matches the current one.
//!
//! Nothing here blocks or sleeps. The event loop calls [`SearchController::tick`]
//! to fire the debounce and [`SearchController::pump`] to collect results.

use super::debouncer::{Clock, Debouncer};
use super::focus::{FocusNavigator, GridKey, NavOutcome};
use super::query_state::QueryState;
use crate::model::ResultItem;
use crate::provider::{FetchCompletion, FetchDispatcher, FetchKind, FetchTicket};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default quiet period before a typed query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

// ===== SearchSettings =====

/// Tunables fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Items per page.
    pub page_size: usize,
    /// Quiet period for text input.
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

// ===== Outcomes =====

/// Whether a completion changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The completion belonged to the live query and was applied.
    Applied,
    /// The completion was stale and ignored.
    Discarded,
}

/// An item the user asked to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// Index in the current result list.
    pub index: usize,
    /// The activated item.
    pub item: ResultItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebouncedAction {
    StartQuery,
}

// ===== SearchController =====

/// Orchestrates search, filtering, pagination and grid focus.
pub struct SearchController<D, C> {
    dispatcher: D,
    clock: C,
    state: QueryState,
    focus: FocusNavigator,
    debouncer: Debouncer<DebouncedAction>,
}

impl<D: FetchDispatcher, C: Clock> SearchController<D, C> {
    /// Create a controller. No fetch is issued until [`Self::on_mount`].
    pub fn new(dispatcher: D, clock: C, settings: SearchSettings) -> Self {
        Self {
            dispatcher,
            clock,
            state: QueryState::new(settings.page_size),
            focus: FocusNavigator::default(),
            debouncer: Debouncer::new(settings.debounce),
        }
    }

    // ===== Snapshots =====

    /// Query, results and loading flags.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Grid focus and hover.
    pub fn focus(&self) -> &FocusNavigator {
        &self.focus
    }

    /// The fetch dispatcher.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// The fetch dispatcher, mutably.
    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// Clock driving the debounce.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the pending debounced query is due, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Whether a typed query is waiting for the quiet period.
    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    // ===== User intents =====

    /// Seed text and category before mounting, without fetching.
    pub fn preset(&mut self, text: &str, category: Option<&str>) {
        self.state.set_raw_text(text);
        self.state.set_category(normalize_category(category));
    }

    /// Start the initial query for the current text and category.
    pub fn on_mount(&mut self) {
        self.start_new_query();
    }

    /// Record the new field value and arm the debounced query.
    pub fn on_text_changed(&mut self, text: &str) {
        self.state.set_raw_text(text);
        let now = self.clock.now();
        self.debouncer.schedule(DebouncedAction::StartQuery, now);
        debug!(
            text = self.state.raw_text(),
            quiet_ms = self.debouncer.quiet_period().as_millis() as u64,
            "Debounced query scheduled"
        );
    }

    /// Query immediately, skipping any pending debounce.
    pub fn on_submit(&mut self) {
        self.debouncer.cancel();
        self.start_new_query();
    }

    /// Switch category and query immediately. `None` selects every category.
    pub fn on_filter_selected(&mut self, category: Option<&str>) {
        self.debouncer.cancel();
        self.state.set_category(normalize_category(category));
        self.start_new_query();
    }

    /// Empty the search text and query immediately.
    pub fn on_clear(&mut self) {
        self.debouncer.cancel();
        self.state.set_raw_text("");
        self.start_new_query();
    }

    /// Request the next page of the committed query. Returns whether a
    /// fetch was dispatched.
    pub fn on_load_more(&mut self) -> bool {
        let Some(page) = self.state.begin_load_more() else {
            debug!(
                has_more = self.state.has_more(),
                loading_initial = self.state.loading_initial(),
                loading_more = self.state.loading_more(),
                "Load more ignored"
            );
            return false;
        };
        let ticket = FetchTicket {
            epoch: self.state.request_epoch(),
            kind: FetchKind::More,
            query: self.state.committed_query_for(page),
        };
        debug!(epoch = ticket.epoch, page, "Loading more");
        self.dispatcher.dispatch(ticket);
        true
    }

    // ===== Event loop hooks =====

    /// Fire the debounced query if its quiet period is over.
    pub fn tick(&mut self) -> bool {
        match self.debouncer.take_due(self.clock.now()) {
            Some(DebouncedAction::StartQuery) => {
                self.start_new_query();
                true
            }
            None => false,
        }
    }

    /// Apply every completion the dispatcher has collected.
    ///
    /// Returns how many were applied (stale ones are not counted).
    pub fn pump(&mut self) -> usize {
        self.dispatcher
            .drain_completed()
            .into_iter()
            .map(|completion| self.apply_completion(completion))
            .filter(|outcome| *outcome == ApplyOutcome::Applied)
            .count()
    }

    /// Apply one completion if it belongs to the live query.
    pub fn apply_completion(&mut self, completion: FetchCompletion) -> ApplyOutcome {
        let FetchCompletion { ticket, outcome } = completion;
        let current = self.state.request_epoch();

        if ticket.epoch != current {
            debug!(
                epoch = ticket.epoch,
                current,
                page = ticket.query.page,
                "Discarding stale response"
            );
            return ApplyOutcome::Discarded;
        }

        let expected = match ticket.kind {
            FetchKind::Initial => self.state.loading_initial(),
            FetchKind::More => self.state.loading_more(),
        };
        if !expected {
            debug!(epoch = ticket.epoch, kind = ?ticket.kind, "Discarding unexpected response");
            return ApplyOutcome::Discarded;
        }

        match outcome {
            Ok(page) => {
                let received = page.items.len();
                self.state.apply_page(ticket.kind, page);
                debug!(
                    epoch = current,
                    kind = ?ticket.kind,
                    received,
                    loaded = self.state.items().len(),
                    total = self.state.total(),
                    has_more = self.state.has_more(),
                    "Results applied"
                );
            }
            Err(err) => {
                warn!(epoch = current, kind = ?ticket.kind, error = %err, "Fetch failed");
                self.state.apply_failure(ticket.kind, err);
            }
        }
        ApplyOutcome::Applied
    }

    // ===== Grid =====

    /// Feed a grid key to the focus navigator.
    ///
    /// Returns the item to open when the key activates one.
    pub fn handle_grid_key(&mut self, key: GridKey) -> Option<DetailRequest> {
        let interactive = !self.state.loading_initial();
        match self.focus.handle(key, self.state.items().len(), interactive) {
            NavOutcome::Activate(index) => self.detail_for(index),
            _ => None,
        }
    }

    /// Open the item at `index` (mouse click). Focus is unchanged.
    pub fn activate(&mut self, index: usize) -> Option<DetailRequest> {
        if self.state.loading_initial() {
            return None;
        }
        self.detail_for(index)
    }

    /// Record mouse hover. Out-of-range indices clear it.
    pub fn on_hover(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.state.items().len());
        self.focus.set_hovered(index);
    }

    /// Column count of the rendered grid.
    pub fn set_columns(&mut self, columns: usize) {
        self.focus.set_columns(columns);
    }

    fn detail_for(&self, index: usize) -> Option<DetailRequest> {
        let item = self.state.items().get(index)?.clone();
        info!(index, id = %item.id(), "Item activated");
        Some(DetailRequest { index, item })
    }

    fn start_new_query(&mut self) {
        let epoch = self.state.begin_query();
        self.focus.reset();
        let query = self.state.committed_query_for(1);
        info!(
            epoch,
            text = query.text.as_deref().unwrap_or(""),
            category = query.category.as_deref().unwrap_or("*"),
            "Starting query"
        );
        self.dispatcher.dispatch(FetchTicket {
            epoch,
            kind: FetchKind::Initial,
            query,
        });
    }
}

fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase)
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_controller_tests.rs"]
mod tests;
