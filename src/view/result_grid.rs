//! Result grid: loading, empty and error states, and the item cards.

use super::constants::{EMPTY, EMPTY_HINT, ERROR, LOADING};
use super::layout::truncate;
use super::styles::Palette;
use crate::model::ResultItem;
use crate::state::{FocusNavigator, QueryState, ResultsPhase};
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

// ===== ItemCard =====

/// One result card.
///
/// Keyboard focus is shown on the border, mouse hover on the title.
pub struct ItemCard<'a> {
    item: &'a ResultItem,
    today: NaiveDate,
    focused: bool,
    hovered: bool,
    palette: &'a Palette,
}

impl<'a> ItemCard<'a> {
    /// Create a card for `item`, dating it relative to `today`.
    pub fn new(item: &'a ResultItem, today: NaiveDate, palette: &'a Palette) -> Self {
        Self {
            item,
            today,
            focused: false,
            hovered: false,
            palette,
        }
    }

    /// Draw the keyboard focus border.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draw the hover title style.
    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }
}

impl Widget for ItemCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.palette.focus_border
        } else {
            self.palette.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let title_style = if self.hovered {
            self.palette.hover_title
        } else {
            self.palette.text
        };
        let byline = format!("{} · {}", self.item.author(), self.item.date_label(self.today));
        let tags = self
            .item
            .tags()
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        let image = if self.item.image().is_some() {
            "▣ foto"
        } else {
            "□ sem foto"
        };

        let lines = vec![
            Line::from(Span::styled(truncate(self.item.title(), width), title_style)),
            Line::from(Span::styled(truncate(&byline, width), self.palette.muted)),
            Line::from(Span::styled(truncate(&tags, width), self.palette.accent)),
            Line::from(Span::styled(image, self.palette.muted)),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

// ===== ResultGrid =====

/// The results area.
///
/// `cards` pairs item indices with their on-screen rectangles; only those
/// items are drawn.
pub struct ResultGrid<'a> {
    state: &'a QueryState,
    focus: &'a FocusNavigator,
    cards: &'a [(usize, Rect)],
    today: NaiveDate,
    palette: &'a Palette,
}

impl<'a> ResultGrid<'a> {
    /// Grid for `state`, drawing the given card rectangles.
    pub fn new(
        state: &'a QueryState,
        focus: &'a FocusNavigator,
        cards: &'a [(usize, Rect)],
        today: NaiveDate,
        palette: &'a Palette,
    ) -> Self {
        Self {
            state,
            focus,
            cards,
            today,
            palette,
        }
    }

    fn render_message(&self, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let area = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for ResultGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.phase() {
            ResultsPhase::Loading => {
                let lines = vec![Line::from(Span::styled(LOADING, self.palette.muted))];
                self.render_message(lines, area, buf);
            }
            ResultsPhase::Error => {
                let reason = self
                    .state
                    .last_error()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let lines = vec![
                    Line::from(Span::styled(ERROR, self.palette.error)),
                    Line::from(Span::styled(reason, self.palette.muted)),
                ];
                self.render_message(lines, area, buf);
            }
            ResultsPhase::Empty => {
                let lines = vec![
                    Line::from(Span::styled(EMPTY, self.palette.title)),
                    Line::from(Span::styled(EMPTY_HINT, self.palette.muted)),
                ];
                self.render_message(lines, area, buf);
            }
            ResultsPhase::Ready => {
                let items = self.state.items();
                for &(index, card_area) in self.cards {
                    let Some(item) = items.get(index) else {
                        continue;
                    };
                    let card_area = card_area.intersection(area);
                    if card_area.is_empty() {
                        continue;
                    }
                    ItemCard::new(item, self.today, self.palette)
                        .focused(self.focus.selected_index() == Some(index))
                        .hovered(self.focus.hovered() == Some(index))
                        .render(card_area, buf);
                }
            }
        }
    }
}
