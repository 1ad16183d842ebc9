//! Search bar widget: glyph, text field and clear marker.

use super::constants::SEARCH_HINT;
use super::styles::Palette;
use crate::state::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const SEARCH_GLYPH: &str = "⌕ ";
const CLEAR_GLYPH: &str = "✕";

/// Search input widget.
pub struct SearchBar<'a> {
    input: &'a TextInput,
    focused: bool,
    clear_enabled: bool,
    palette: &'a Palette,
}

impl<'a> SearchBar<'a> {
    /// Create new SearchBar widget.
    pub fn new(input: &'a TextInput, palette: &'a Palette) -> Self {
        Self {
            input,
            focused: false,
            clear_enabled: false,
            palette,
        }
    }

    /// Whether keyboard input goes to the field (draws the cursor).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Whether the clear marker is active.
    pub fn clear_enabled(mut self, enabled: bool) -> Self {
        self.clear_enabled = enabled;
        self
    }

    fn field_line(&self, width: usize) -> Line<'static> {
        let glyph = Span::styled(SEARCH_GLYPH, self.palette.muted);

        if self.input.is_empty() {
            let mut spans = vec![glyph];
            if self.focused {
                spans.push(Span::styled(" ", cursor_style()));
            }
            spans.push(Span::styled(SEARCH_HINT, self.palette.muted));
            return Line::from(spans);
        }

        let chars: Vec<char> = self.input.value().chars().collect();
        let cursor = self.input.cursor().min(chars.len());
        // Keep the cursor in view when the text is wider than the field.
        let room = width.saturating_sub(SEARCH_GLYPH.chars().count() + 1).max(1);
        let start = (cursor + 1).saturating_sub(room);

        let before: String = chars[start..cursor].iter().collect();
        let mut spans = vec![glyph, Span::styled(before, self.palette.text)];

        if self.focused {
            let under = chars.get(cursor).map_or(" ".to_string(), |c| c.to_string());
            let after: String = chars.iter().skip(cursor + 1).collect();
            spans.push(Span::styled(under, cursor_style()));
            spans.push(Span::styled(after, self.palette.text));
        } else {
            let after: String = chars[cursor..].iter().collect();
            spans.push(Span::styled(after, self.palette.text));
        }
        Line::from(spans)
    }
}

fn cursor_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.palette.focus_border
        } else {
            self.palette.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled("Buscar", self.palette.muted));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 3 || inner.height == 0 {
            return;
        }

        let field = Rect {
            width: inner.width - 2,
            ..inner
        };
        let clear = Rect {
            x: inner.x + inner.width - 1,
            width: 1,
            ..inner
        };

        Paragraph::new(self.field_line(field.width as usize)).render(field, buf);

        let clear_style = if self.clear_enabled {
            self.palette.accent
        } else {
            self.palette.muted.add_modifier(Modifier::DIM)
        };
        Paragraph::new(Span::styled(CLEAR_GLYPH, clear_style)).render(clear, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::buffer_lines;

    fn render(input: &TextInput, focused: bool, clear: bool) -> Vec<String> {
        let palette = Palette::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchBar::new(input, &palette)
            .focused(focused)
            .clear_enabled(clear)
            .render(area, &mut buf);
        buffer_lines(&buf)
    }

    #[test]
    fn empty_field_shows_hint() {
        let lines = render(&TextInput::new(), false, false);
        assert!(lines[1].contains("Buscar publicações"), "{lines:?}");
        assert!(lines[0].contains("Buscar"));
    }

    #[test]
    fn typed_text_replaces_hint() {
        let lines = render(&TextInput::with_value("violão"), true, true);
        assert!(lines[1].contains("⌕ violão"), "{lines:?}");
        assert!(!lines[1].contains("Buscar publicações"));
        assert!(lines[1].contains('✕'));
    }

    #[test]
    fn clear_marker_style_follows_enabled_flag() {
        let palette = Palette::default();
        let area = Rect::new(0, 0, 30, 3);
        let input = TextInput::with_value("x");

        let mut enabled = Buffer::empty(area);
        SearchBar::new(&input, &palette)
            .clear_enabled(true)
            .render(area, &mut enabled);
        let mut disabled = Buffer::empty(area);
        SearchBar::new(&input, &palette).render(area, &mut disabled);

        let cell = (28, 1);
        assert_eq!(enabled[cell].symbol(), "✕");
        assert_ne!(enabled[cell].style(), disabled[cell].style());
    }

    #[test]
    fn long_text_keeps_cursor_visible() {
        let input = TextInput::with_value("a".repeat(60) + "fim");
        let lines = render(&input, true, true);
        assert!(lines[1].contains("fim"), "{lines:?}");
    }
}
