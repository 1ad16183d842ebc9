//! Category chip row ("Todos" followed by every category).

use super::constants::ALL_CATEGORIES;
use super::styles::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// One chip: the category it selects and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// `None` for the "Todos" chip.
    pub category: Option<String>,
    /// Text shown on the chip.
    pub label: String,
}

/// "Todos" plus one chip per category, in order.
pub fn chips_for(categories: &[String]) -> Vec<Chip> {
    std::iter::once(Chip {
        category: None,
        label: ALL_CATEGORIES.to_string(),
    })
    .chain(categories.iter().map(|c| Chip {
        category: Some(c.clone()),
        label: chip_label(c),
    }))
    .collect()
}

/// Category name with its first letter capitalized.
pub fn chip_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lay chips out left to right, one space apart.
///
/// Chips that do not fit in `area` are dropped.
pub fn chip_areas(area: Rect, chips: &[Chip]) -> Vec<Rect> {
    let right = area.x.saturating_add(area.width);
    let mut x = area.x;
    let mut areas = Vec::with_capacity(chips.len());
    for chip in chips {
        let width = u16::try_from(chip.label.width() + 2).unwrap_or(u16::MAX);
        if x.saturating_add(width) > right {
            break;
        }
        areas.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width + 1);
    }
    areas
}

/// Chip row widget.
pub struct FilterChips<'a> {
    chips: &'a [Chip],
    areas: &'a [Rect],
    selected: Option<&'a str>,
    palette: &'a Palette,
}

impl<'a> FilterChips<'a> {
    /// Create the widget. `areas` comes from [`chip_areas`].
    pub fn new(
        chips: &'a [Chip],
        areas: &'a [Rect],
        selected: Option<&'a str>,
        palette: &'a Palette,
    ) -> Self {
        Self {
            chips,
            areas,
            selected,
            palette,
        }
    }
}

impl Widget for FilterChips<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (chip, chip_area) in self.chips.iter().zip(self.areas) {
            let chip_area = chip_area.intersection(area);
            if chip_area.is_empty() {
                continue;
            }
            let style = if chip.category.as_deref() == self.selected {
                self.palette.chip_selected
            } else {
                self.palette.chip
            };
            Paragraph::new(Span::styled(format!(" {} ", chip.label), style)).render(chip_area, buf);
        }
    }
}
