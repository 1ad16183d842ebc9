//! Result item value object and its identifier.
//!
//! A `ResultItem` is what the provider hands back for one post on the
//! explore page. It is immutable once built.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// ===== ItemId =====

/// Opaque identifier of a post.
/// Smart constructor enforces non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

/// Error returned when an empty item id is supplied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Item id must not be empty")]
pub struct InvalidItemId;

impl ItemId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(InvalidItemId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== ResultItem =====

/// One post returned by a result provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    id: ItemId,
    title: String,
    description: String,
    tags: BTreeSet<String>,
    image: Option<String>,
    author: String,
    posted_on: NaiveDate,
}

impl ResultItem {
    /// Build an item. Tags are lowercased so category membership is exact.
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: impl IntoIterator<Item = impl AsRef<str>>,
        author: impl Into<String>,
        posted_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            image: None,
            author: author.into(),
            posted_on,
        }
    }

    /// Attach an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Catalogue identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full description, shown in the detail overlay.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Lowercased category tags.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Image reference, if the post has one.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Display name of the poster.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Day the post was published.
    pub fn posted_on(&self) -> NaiveDate {
        self.posted_on
    }

    /// Whether the item carries `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Case-insensitive substring match against title, description and tags.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self.tags.iter().any(|t| t.contains(needle_lower))
    }

    /// Display date relative to `today` ("Hoje", "Ontem", "3 dias atrás", ...).
    pub fn date_label(&self, today: NaiveDate) -> String {
        relative_date_label(self.posted_on, today)
    }
}

/// Relative date label in the app's locale.
pub fn relative_date_label(posted_on: NaiveDate, today: NaiveDate) -> String {
    let days = (today - posted_on).num_days();
    match days {
        i64::MIN..=0 => "Hoje".to_string(),
        1 => "Ontem".to_string(),
        2..=6 => format!("{days} dias atrás"),
        7..=13 => "1 semana atrás".to_string(),
        14..=29 => format!("{} semanas atrás", days / 7),
        _ => posted_on.format("%d/%m/%Y").to_string(),
    }
}
