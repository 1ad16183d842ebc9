//! Explore page state machine (pure).
//!
//! Every transition here is a plain method call on owned data, testable
//! without a terminal. Time and fetch completion are injected through the
//! [`Clock`] and [`crate::provider::FetchDispatcher`] seams.

pub mod debouncer;
pub mod focus;
pub mod query_state;
pub mod search_controller;
pub mod text_input;

// Re-export for convenience
pub use debouncer::{Clock, Debouncer, ManualClock, SystemClock};
pub use focus::{FocusNavigator, GridFocus, GridKey, NavOutcome};
pub use query_state::{QueryState, ResultsPhase};
pub use search_controller::{
    ApplyOutcome, DetailRequest, SearchController, SearchSettings, DEFAULT_DEBOUNCE,
    DEFAULT_PAGE_SIZE,
};
pub use text_input::TextInput;
