//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod item;
pub mod key_action;

// Re-export for convenience
pub use error::{AppError, CatalogError, ProviderError};
pub use item::{relative_date_label, InvalidItemId, ItemId, ResultItem};
pub use key_action::KeyAction;
