//! Detail overlay for an activated item.
//!
//! Shows a centered modal with the full description, tags and image
//! reference of one post, plus a close affordance.

use super::constants::{CLOSE, DETAIL_POPUP_HEIGHT_PERCENT, DETAIL_POPUP_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::Palette;
use crate::model::ResultItem;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

/// Render the overlay for `item` centered on the frame.
pub fn render_detail_overlay(
    frame: &mut Frame,
    item: &ResultItem,
    today: NaiveDate,
    palette: &Palette,
) {
    let area = detail_area(frame.area());
    frame.render_widget(DetailOverlay::new(item, today, palette), area);
}

/// Where the overlay sits inside `frame_area`.
pub fn detail_area(frame_area: Rect) -> Rect {
    centered_rect(
        DETAIL_POPUP_WIDTH_PERCENT,
        DETAIL_POPUP_HEIGHT_PERCENT,
        frame_area,
    )
}

/// Modal showing one item in full.
pub struct DetailOverlay<'a> {
    item: &'a ResultItem,
    today: NaiveDate,
    palette: &'a Palette,
}

impl<'a> DetailOverlay<'a> {
    /// Overlay for `item`, dated relative to `today`.
    pub fn new(item: &'a ResultItem, today: NaiveDate, palette: &'a Palette) -> Self {
        Self {
            item,
            today,
            palette,
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let item = self.item;
        let tags = item
            .tags()
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        let image = match item.image() {
            Some(image) => format!("▣ {image}"),
            None => "□ sem foto".to_string(),
        };

        vec![
            Line::from(Span::styled(
                format!("por {} · {}", item.author(), item.date_label(self.today)),
                self.palette.muted,
            )),
            Line::from(""),
            Line::from(Span::styled(item.description().to_string(), self.palette.text)),
            Line::from(""),
            Line::from(Span::styled(tags, self.palette.accent)),
            Line::from(Span::styled(image, self.palette.muted)),
        ]
    }
}

impl Widget for DetailOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.focus_border)
            .title(Span::styled(
                format!(" {} ", self.item.title()),
                self.palette.title,
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // Last inner row holds the close button.
        let body = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let footer = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        Paragraph::new(self.body())
            .wrap(Wrap { trim: false })
            .render(body, buf);
        Paragraph::new(Span::styled(format!("[ {CLOSE} ]"), self.palette.accent))
            .alignment(Alignment::Center)
            .render(footer, buf);
    }
}
