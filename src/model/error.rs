//! Error types for the scambo application.
//!
//! Small domain enums built on `thiserror` compose into [`AppError`] through
//! `From` conversions, so `?` works across module boundaries.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`ConfigError`] - Config file could not be read, parsed or validated
//!   - [`LoggingError`] - Tracing subscriber could not be installed
//!   - [`CatalogError`] - Embedded mock catalogue is malformed
//!   - `std::io::Error` - Terminal/TUI failures
//! - [`ProviderError`] - A fetch failed. Never fatal: the search controller
//!   recovers locally and surfaces it as an error flag on the query state.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The mock catalogue could not be built.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of a single fetch against a result provider.
///
/// The search controller treats every variant the same way: the fetch is
/// recorded as "zero results, nothing more to load" and the error is kept on
/// the query state for the presentation layer to show.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The backing store refused or failed the request.
    #[error("Provider unavailable: {reason}")]
    Unavailable {
        /// Human-readable reason.
        reason: String,
    },

    /// Page number or page size is zero.
    #[error("Invalid page request: page {page}, page size {page_size}")]
    InvalidPage {
        /// Requested 1-based page.
        page: u32,
        /// Requested page size.
        page_size: usize,
    },

    /// The worker that was running the fetch went away before answering.
    #[error("Fetch worker disconnected")]
    WorkerDisconnected,
}

/// Errors raised while loading the mock catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalogue JSON could not be parsed.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalogue entry has an empty id.
    #[error("Catalog entry {index} has an empty id")]
    EmptyId {
        /// Position of the entry in the catalogue.
        index: usize,
    },

    /// Two catalogue entries share an id.
    #[error("Duplicate catalog id '{id}'")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}
