//! Scambo explore page
//!
//! Terminal client for browsing barter posts: debounced search, category
//! filter chips, paged results in a keyboard-navigable grid, and a detail
//! overlay.
//!
//! The crate follows a pure core / impure shell split. `model`, `provider`
//! and `state` hold data and transitions with no terminal access; `view`
//! owns the terminal and the event loop.

pub mod config;
pub mod logging;
pub mod model;
pub mod provider;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
