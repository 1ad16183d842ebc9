//! Explore page layout.
//!
//! Geometry is computed once per frame into a [`FrameGeometry`] and kept by
//! the app for mouse hit-testing, then handed to [`render_explore`].

use super::constants::{
    CARD_HEIGHT, CHIPS_HEIGHT, FOOTER_HEIGHT, LOADING_MORE, LOAD_MORE, MEDIUM_WIDTH,
    NARROW_WIDTH, SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT, TITLE, TITLE_HEIGHT,
};
use super::detail::render_detail_overlay;
use super::filter_chips::{chip_areas, chips_for, Chip, FilterChips};
use super::result_grid::ResultGrid;
use super::search_bar::SearchBar;
use super::styles::Palette;
use crate::state::{DetailRequest, FocusNavigator, QueryState, ResultsPhase, TextInput};
use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ===== Pure geometry =====

/// Grid column count for a grid `width` columns wide.
pub fn responsive_columns(width: u16) -> usize {
    if width < NARROW_WIDTH {
        2
    } else if width < MEDIUM_WIDTH {
        3
    } else {
        4
    }
}

/// Vertical regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreAreas {
    /// Page title row.
    pub title: Rect,
    /// Bordered search bar.
    pub search: Rect,
    /// Category chip row.
    pub chips: Rect,
    /// Result grid.
    pub grid: Rect,
    /// Present only while the load-more footer is shown.
    pub footer: Option<Rect>,
    /// Status line at the bottom.
    pub status: Rect,
}

impl ExploreAreas {
    /// Split `area` top to bottom: title, search bar, chips, grid, footer, status.
    pub fn compute(area: Rect, show_footer: bool) -> Self {
        let footer_height = if show_footer { FOOTER_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT),
                Constraint::Length(SEARCH_BAR_HEIGHT),
                Constraint::Length(CHIPS_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(footer_height),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);

        Self {
            title: chunks[0],
            search: chunks[1],
            chips: chunks[2],
            grid: chunks[3],
            footer: show_footer.then_some(chunks[4]),
            status: chunks[5],
        }
    }
}

/// Number of card rows that fit in `grid`. Never zero.
pub fn visible_rows(grid: Rect) -> usize {
    usize::from(grid.height / CARD_HEIGHT).max(1)
}

/// Total card rows for `len` items.
pub fn total_rows(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1))
}

/// Largest valid first visible row.
pub fn max_first_row(len: usize, columns: usize, visible: usize) -> usize {
    total_rows(len, columns).saturating_sub(visible)
}

/// Scroll offset that keeps `selected` on screen.
///
/// Returns `first_row` unchanged when nothing is selected or the selection
/// is already visible.
pub fn follow_selection(
    first_row: usize,
    selected: Option<usize>,
    columns: usize,
    visible: usize,
) -> usize {
    let Some(selected) = selected else {
        return first_row;
    };
    let row = selected / columns.max(1);
    if row < first_row {
        row
    } else if row >= first_row + visible {
        row + 1 - visible
    } else {
        first_row
    }
}

/// On-screen rectangles of the visible cards, paired with item indices.
pub fn card_areas(grid: Rect, columns: usize, first_row: usize, len: usize) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let card_width = grid.width / columns as u16;
    if card_width == 0 || grid.height == 0 {
        return Vec::new();
    }

    let visible = visible_rows(grid);
    let start = first_row * columns;
    let end = len.min((first_row + visible) * columns);

    (start..end)
        .map(|index| {
            let row = (index / columns - first_row) as u16;
            let col = (index % columns) as u16;
            let area = Rect::new(
                grid.x + col * card_width,
                grid.y + row * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            );
            (index, area.intersection(grid))
        })
        .collect()
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = percent_of(area.width, percent_x);
    let popup_height = percent_of(area.height, percent_y);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

/// Cut `text` to `max_width` display columns, ending with "…" when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Footer text for the current pagination state, if the footer is shown.
pub fn footer_label(state: &QueryState) -> Option<String> {
    if state.loading_more() {
        Some(LOADING_MORE.to_string())
    } else if state.has_more() && !state.loading_initial() {
        Some(format!("[ {LOAD_MORE} ]"))
    } else {
        None
    }
}

// ===== FrameGeometry =====

/// Everything a frame needs to know about where things are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Page regions.
    pub areas: ExploreAreas,
    /// Grid columns for this width.
    pub columns: usize,
    /// First visible card row, clamped to the content.
    pub first_row: usize,
    /// Card rows that fit in the grid.
    pub visible_rows: usize,
    /// Visible cards with their item indices.
    pub cards: Vec<(usize, Rect)>,
    /// Chips in display order.
    pub chips: Vec<Chip>,
    /// Rectangle of each chip, parallel to `chips`.
    pub chip_areas: Vec<Rect>,
    /// The clickable load-more label.
    pub load_more: Option<Rect>,
}

impl FrameGeometry {
    /// Lay out a frame of size `area`, scrolled to `first_row`.
    pub fn compute(area: Rect, state: &QueryState, categories: &[String], first_row: usize) -> Self {
        let footer = footer_label(state);
        let areas = ExploreAreas::compute(area, footer.is_some());
        let columns = responsive_columns(areas.grid.width);
        let visible = visible_rows(areas.grid);
        let len = state.items().len();
        let first_row = first_row.min(max_first_row(len, columns, visible));

        let cards = if state.phase() == ResultsPhase::Ready {
            card_areas(areas.grid, columns, first_row, len)
        } else {
            Vec::new()
        };

        let chips = chips_for(categories);
        let chip_rects = chip_areas(areas.chips, &chips);

        let load_more = match (areas.footer, &footer) {
            (Some(footer_area), Some(label)) if !state.loading_more() => {
                let width = (label.width() as u16).min(footer_area.width);
                let x = footer_area.x + (footer_area.width - width) / 2;
                Some(Rect::new(x, footer_area.y, width, 1))
            }
            _ => None,
        };

        Self {
            areas,
            columns,
            first_row,
            visible_rows: visible,
            cards,
            chips,
            chip_areas: chip_rects,
            load_more,
        }
    }

    /// Item index of the card under (`column`, `row`).
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.cards
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|&(index, _)| index)
    }

    /// Chip under (`column`, `row`).
    pub fn chip_at(&self, column: u16, row: u16) -> Option<&Chip> {
        let pos = Position::new(column, row);
        self.chips
            .iter()
            .zip(&self.chip_areas)
            .find(|(_, area)| area.contains(pos))
            .map(|(chip, _)| chip)
    }

    /// Whether (`column`, `row`) hits the load-more label.
    pub fn load_more_at(&self, column: u16, row: u16) -> bool {
        self.load_more
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Whether (`column`, `row`) hits the clear marker of the search bar.
    pub fn clear_at(&self, column: u16, row: u16) -> bool {
        let search = self.areas.search;
        search.width >= 2
            && search.height >= 2
            && column == search.x + search.width - 2
            && row == search.y + 1
    }

    /// Whether (`column`, `row`) is inside the search bar.
    pub fn search_at(&self, column: u16, row: u16) -> bool {
        self.areas.search.contains(Position::new(column, row))
    }
}

// ===== Rendering =====

/// Borrowed snapshot of what to draw.
pub struct ExploreView<'a> {
    /// Query and results.
    pub state: &'a QueryState,
    /// Grid focus and hover.
    pub focus: &'a FocusNavigator,
    /// Search field contents.
    pub input: &'a TextInput,
    /// Whether keys go to the search field.
    pub input_focused: bool,
    /// Open detail overlay, if any.
    pub detail: Option<&'a DetailRequest>,
    /// Colours.
    pub palette: &'a Palette,
    /// Reference day for relative dates.
    pub today: NaiveDate,
}

/// Render the whole page, then the detail overlay on top when open.
pub fn render_explore(frame: &mut Frame, view: &ExploreView<'_>, geometry: &FrameGeometry) {
    let areas = &geometry.areas;
    let palette = view.palette;

    frame.render_widget(
        Paragraph::new(Span::styled(TITLE, palette.title)),
        areas.title,
    );

    frame.render_widget(
        SearchBar::new(view.input, palette)
            .focused(view.input_focused)
            .clear_enabled(view.state.clear_enabled()),
        areas.search,
    );

    frame.render_widget(
        FilterChips::new(
            &geometry.chips,
            &geometry.chip_areas,
            view.state.category(),
            palette,
        ),
        areas.chips,
    );

    frame.render_widget(
        ResultGrid::new(view.state, view.focus, &geometry.cards, view.today, palette),
        areas.grid,
    );

    if let (Some(footer), Some(label)) = (areas.footer, footer_label(view.state)) {
        let style = if view.state.loading_more() {
            palette.muted
        } else {
            palette.accent
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center),
            footer,
        );
    }

    render_status_bar(frame, areas.status, view);

    if let Some(detail) = view.detail {
        render_detail_overlay(frame, &detail.item, view.today, palette);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ExploreView<'_>) {
    let palette = view.palette;
    let state = view.state;
    let mut spans = Vec::new();

    if state.phase() == ResultsPhase::Ready {
        spans.push(Span::styled(
            format!("Mostrando {} de {}", state.items().len(), state.total()),
            palette.text,
        ));
        if let Some(err) = state.last_error() {
            spans.push(Span::styled(
                format!(" · Falha ao carregar mais: {err}"),
                palette.error,
            ));
        }
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(status_hint(view), palette.muted));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_hint(view: &ExploreView<'_>) -> &'static str {
    if view.detail.is_some() {
        "Esc fechar"
    } else if view.focus.is_focused() {
        "←↑↓→ navegar · Enter abrir · m mais · Esc voltar"
    } else {
        "Enter buscar · Tab resultados · Ctrl+←/→ categorias · Ctrl+Q sair"
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
