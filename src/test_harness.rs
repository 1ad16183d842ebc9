//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend, DeferredDispatcher, ManualClock>` with
//! methods for simulating user interactions. Fetches stay pending until a
//! test resolves them, and time only moves when a test advances the clock.

use crate::model::ProviderError;
use crate::provider::{DeferredDispatcher, MockCatalog, ResultProvider};
use crate::state::{ManualClock, SearchController, SearchSettings};
use crate::view::{Palette, TuiApp, TuiError};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Rows of `buffer` as strings with trailing whitespace removed.
///
/// Cells covered by the right half of a wide character are skipped so
/// lines read the way they look.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut skip = 0;
        for x in area.left()..area.right() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buffer[(x, y)].symbol();
            skip = symbol.width().saturating_sub(1);
            line.push_str(symbol);
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

/// Day the seeded catalogue's relative dates are computed from.
pub fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// The bundled catalogue, dated against [`reference_day`].
pub fn seeded_catalog() -> MockCatalog {
    MockCatalog::seeded(reference_day()).unwrap()
}

/// Test harness for acceptance testing
#[allow(dead_code)] // Not all helpers used in every test module
pub struct ExploreHarness {
    app: TuiApp<TestBackend, DeferredDispatcher, ManualClock>,
    clock: ManualClock,
    catalog: MockCatalog,
}

#[allow(dead_code)]
impl ExploreHarness {
    /// Seeded catalogue on an 80x24 terminal.
    pub fn new() -> Self {
        Self::with_size(80, 24)
    }

    /// Seeded catalogue with custom terminal size.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self::build(seeded_catalog(), width, height, "", None)
    }

    /// Seeded catalogue with preset text and category.
    pub fn with_preset(text: &str, category: Option<&str>) -> Self {
        Self::build(seeded_catalog(), 80, 24, text, category)
    }

    /// Custom catalogue on a terminal of the given size.
    pub fn build(
        catalog: MockCatalog,
        width: u16,
        height: u16,
        text: &str,
        category: Option<&str>,
    ) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let clock = ManualClock::new();
        let mut controller = SearchController::new(
            DeferredDispatcher::new(),
            clock.clone(),
            SearchSettings::default(),
        );
        controller.preset(text, category);
        let categories = catalog.categories();
        let mut app = TuiApp::new(terminal, controller, categories, Palette::default(), reference_day());
        app.render_test().unwrap();
        Self {
            app,
            clock,
            catalog,
        }
    }

    pub fn app(&self) -> &TuiApp<TestBackend, DeferredDispatcher, ManualClock> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut TuiApp<TestBackend, DeferredDispatcher, ManualClock> {
        &mut self.app
    }

    pub fn catalog(&self) -> &MockCatalog {
        &self.catalog
    }

    pub fn dispatcher(&self) -> &DeferredDispatcher {
        self.app.controller().dispatcher()
    }

    pub fn dispatcher_mut(&mut self) -> &mut DeferredDispatcher {
        self.app.controller_mut().dispatcher_mut()
    }

    /// Send a key, then process background work and redraw.
    ///
    /// Returns true if the app asked to quit.
    pub fn press(&mut self, code: KeyCode) -> bool {
        self.press_with(code, KeyModifiers::NONE)
    }

    /// Send a key with modifiers.
    pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let quit = self.app.handle_key_test(KeyEvent::new(code, modifiers));
        self.settle();
        quit
    }

    /// Type `text` one character at a time without letting time pass.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    /// Move the clock forward and let the app react.
    pub fn advance(&mut self, by: Duration) {
        self.clock.advance(by);
        self.settle();
    }

    /// Answer every pending fetch from the catalogue.
    pub fn resolve_all(&mut self) {
        let catalog = self.catalog.clone();
        self.dispatcher_mut().resolve_all(&catalog);
        self.settle();
    }

    /// Answer only the oldest pending fetch.
    pub fn resolve_oldest(&mut self) -> bool {
        let catalog = self.catalog.clone();
        let resolved = self.dispatcher_mut().resolve_oldest(&catalog);
        self.settle();
        resolved
    }

    /// Fail the oldest pending fetch with an unavailable provider.
    pub fn fail_oldest(&mut self, reason: &str) -> bool {
        let failed = self.dispatcher_mut().fail_oldest(ProviderError::Unavailable {
            reason: reason.to_string(),
        });
        self.settle();
        failed
    }

    /// Left-click at (`column`, `row`).
    pub fn click(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
    }

    /// Move the pointer to (`column`, `row`).
    pub fn hover(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Moved, column, row);
    }

    /// Scroll the wheel down over the grid.
    pub fn scroll_down(&mut self) {
        self.mouse(MouseEventKind::ScrollDown, 10, 10);
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.settle();
    }

    /// Resize the terminal and redraw.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), TuiError> {
        self.app.handle_resize_test(width, height);
        self.app.terminal_mut_test().backend_mut().resize(width, height);
        self.app.render_test()
    }

    /// Current screen as lines.
    pub fn screen(&self) -> Vec<String> {
        buffer_lines(self.app.terminal().backend().buffer())
    }

    /// Current screen as one string.
    pub fn screen_text(&self) -> String {
        self.screen().join("\n")
    }

    fn settle(&mut self) {
        self.app.process_background_test();
        self.app.render_test().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn buffer_lines_trims_and_keeps_blank_rows() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 3));
        buf.set_string(0, 0, "ab", ratatui::style::Style::default());
        assert_eq!(buffer_lines(&buf), vec!["ab", "", ""]);
    }

    #[test]
    fn buffer_lines_skips_wide_character_tails() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        buf.set_string(0, 0, "日x", ratatui::style::Style::default());
        assert_eq!(buffer_lines(&buf), vec!["日x"]);
    }

    #[test]
    fn harness_starts_loading_first_page() {
        let harness = ExploreHarness::new();
        assert_eq!(harness.dispatcher().pending_len(), 1);
        assert!(harness.screen_text().contains("Buscando publicações..."));
    }
}
