//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests that drive the whole explore page
//! through key and mouse events against a deterministic dispatcher and
//! clock.

mod acceptance_pagination;
