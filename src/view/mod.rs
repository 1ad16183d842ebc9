//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod detail;
mod filter_chips;
mod layout;
mod result_grid;
mod search_bar;
mod styles;

pub use detail::{detail_area, render_detail_overlay, DetailOverlay};
pub use filter_chips::{chip_areas, chip_label, chips_for, Chip, FilterChips};
pub use layout::{
    card_areas, centered_rect, follow_selection, footer_label, render_explore,
    responsive_columns, truncate, visible_rows, ExploreAreas, ExploreView, FrameGeometry,
};
pub use result_grid::{ItemCard, ResultGrid};
pub use search_bar::SearchBar;
pub use styles::{ColorConfig, Palette};

use crate::config::{KeyBindings, KeyContext, Theme};
use crate::model::{AppError, KeyAction};
use crate::provider::{FetchDispatcher, ResultProvider, ThreadedDispatcher};
use crate::state::{
    Clock, DetailRequest, GridKey, SearchController, SearchSettings, SystemClock, TextInput,
};
use chrono::NaiveDate;
use constants::TICK_INTERVAL;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(io) => AppError::Terminal(io),
            TuiError::App(app) => app,
        }
    }
}

/// What a mouse click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClickTarget {
    Card(usize),
    Chip(Option<String>),
    LoadMore,
    Clear,
    Search,
    Nothing,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// dispatcher and clock so tests control when fetches finish and time moves.
pub struct TuiApp<B, D, C>
where
    B: Backend,
{
    terminal: Terminal<B>,
    controller: SearchController<D, C>,
    input: TextInput,
    categories: Vec<String>,
    key_bindings: KeyBindings,
    palette: Palette,
    today: NaiveDate,
    detail: Option<DetailRequest>,
    /// First visible card row.
    grid_scroll: usize,
    /// Epoch the scroll offset belongs to; a new query scrolls back to the top.
    scroll_epoch: u64,
    /// Geometry of the last drawn frame (for mouse hit-testing)
    geometry: Option<FrameGeometry>,
}

impl<D, C> TuiApp<CrosstermBackend<Stdout>, D, C>
where
    D: FetchDispatcher,
    C: Clock,
{
    /// Run the main event loop
    ///
    /// Returns when the user quits (Ctrl+C or Ctrl+Q). Between input events
    /// the loop wakes at the debounce deadline or every [`TICK_INTERVAL`],
    /// whichever is sooner, to fire typed queries and apply finished fetches.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(self.poll_timeout())? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.process_background() || dirty {
                self.draw()?;
            }
        }
    }
}

impl<B, D, C> TuiApp<B, D, C>
where
    B: Backend,
    D: FetchDispatcher,
    C: Clock,
{
    /// Wrap `terminal` and `controller` and issue the initial query.
    pub fn new(
        terminal: Terminal<B>,
        mut controller: SearchController<D, C>,
        categories: Vec<String>,
        palette: Palette,
        today: NaiveDate,
    ) -> Self {
        let input = TextInput::with_value(controller.state().raw_text());
        controller.on_mount();
        let scroll_epoch = controller.state().request_epoch();

        Self {
            terminal,
            controller,
            input,
            categories,
            key_bindings: KeyBindings::default(),
            palette,
            today,
            detail: None,
            grid_scroll: 0,
            scroll_epoch,
            geometry: None,
        }
    }

    fn poll_timeout(&self) -> Duration {
        match self.controller.next_deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(self.controller.clock().now())
                .min(TICK_INTERVAL),
            None => TICK_INTERVAL,
        }
    }

    /// Fire a due debounced query and apply finished fetches.
    ///
    /// Returns true if anything changed.
    fn process_background(&mut self) -> bool {
        let fired = self.controller.tick();
        let applied = self.controller.pump();
        fired || applied > 0
    }

    fn key_context(&self) -> KeyContext {
        if self.detail.is_some() {
            KeyContext::Detail
        } else if self.controller.focus().is_focused() {
            KeyContext::Grid
        } else {
            KeyContext::SearchInput
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let context = self.key_context();

        if let Some(action) = self.key_bindings.resolve(key, context) {
            return self.apply_action(action);
        }

        if context == KeyContext::SearchInput && key.kind != KeyEventKind::Release {
            self.edit_input(key);
        }
        false
    }

    /// Apply an unbound key to the search field.
    fn edit_input(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.insert_char(ch)
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => {
                self.input.cursor_left();
                false
            }
            KeyCode::Right => {
                self.input.cursor_right();
                false
            }
            KeyCode::Home => {
                self.input.cursor_home();
                false
            }
            KeyCode::End => {
                self.input.cursor_end();
                false
            }
            _ => false,
        };

        if changed {
            self.controller.on_text_changed(self.input.value());
        }
    }

    /// Dispatch a bound action. Returns true if app should quit.
    fn apply_action(&mut self, action: KeyAction) -> bool {
        if let Some(grid_key) = action.as_grid_key() {
            self.apply_grid_key(grid_key);
            return false;
        }

        match action {
            KeyAction::Quit => return true,
            KeyAction::SubmitSearch => self.controller.on_submit(),
            KeyAction::ClearSearch => self.clear_search(),
            KeyAction::LoadMore => {
                self.controller.on_load_more();
            }
            KeyAction::NextCategory => self.cycle_category(1),
            KeyAction::PrevCategory => self.cycle_category(-1),
            KeyAction::AllCategories => self.controller.on_filter_selected(None),
            KeyAction::CloseDetail => self.close_detail(),
            // Grid actions were handled above.
            _ => {}
        }
        false
    }

    fn apply_grid_key(&mut self, key: GridKey) {
        if let Some(request) = self.controller.handle_grid_key(key) {
            self.open_detail(request);
        }
        if let Some(geometry) = &self.geometry {
            self.grid_scroll = follow_selection(
                self.grid_scroll,
                self.controller.focus().selected_index(),
                geometry.columns,
                geometry.visible_rows,
            );
        }
    }

    fn clear_search(&mut self) {
        if !self.controller.state().clear_enabled() && self.input.is_empty() {
            return;
        }
        self.input.clear();
        self.controller.on_clear();
    }

    /// Move the category selection `step` chips along, wrapping around.
    fn cycle_category(&mut self, step: isize) {
        let options: Vec<Option<&str>> = std::iter::once(None)
            .chain(self.categories.iter().map(|c| Some(c.as_str())))
            .collect();
        let current = self.controller.state().category();
        let index = options.iter().position(|o| *o == current).unwrap_or(0);
        let next = (index as isize + step).rem_euclid(options.len() as isize) as usize;
        let category = options[next].map(str::to_owned);
        self.controller.on_filter_selected(category.as_deref());
    }

    fn open_detail(&mut self, request: DetailRequest) {
        info!(index = request.index, id = %request.item.id(), "Detail opened");
        self.controller.on_hover(None);
        self.detail = Some(request);
    }

    fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            debug!("Detail closed");
        }
    }

    /// Handle a single mouse event
    ///
    /// Moves hover, opens cards, selects chips, loads more, clears the field,
    /// and scrolls the grid. Any click while the detail overlay is open closes it.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(geometry) = &self.geometry else {
            return;
        };
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => {
                let hovered = if self.detail.is_none() {
                    geometry.card_at(column, row)
                } else {
                    None
                };
                self.controller.on_hover(hovered);
            }
            MouseEventKind::ScrollDown => {
                let max = layout::max_first_row(
                    self.controller.state().items().len(),
                    geometry.columns,
                    geometry.visible_rows,
                );
                self.grid_scroll = (self.grid_scroll + 1).min(max);
            }
            MouseEventKind::ScrollUp => {
                self.grid_scroll = self.grid_scroll.saturating_sub(1);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.detail.is_some() {
                    self.close_detail();
                    return;
                }
                let target = click_target(geometry, column, row);
                self.apply_click(target);
            }
            _ => {}
        }
    }

    fn apply_click(&mut self, target: ClickTarget) {
        debug!(?target, "Click");
        match target {
            ClickTarget::Card(index) => {
                if let Some(request) = self.controller.activate(index) {
                    self.open_detail(request);
                }
            }
            ClickTarget::Chip(category) => self.controller.on_filter_selected(category.as_deref()),
            ClickTarget::LoadMore => {
                self.controller.on_load_more();
            }
            ClickTarget::Clear => self.clear_search(),
            ClickTarget::Search => {
                if self.controller.focus().is_focused() {
                    self.controller.handle_grid_key(GridKey::Escape);
                }
            }
            ClickTarget::Nothing => {}
        }
    }

    /// Handle a terminal resize event
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.controller.set_columns(responsive_columns(width.max(1)));
    }

    /// Render the current frame and remember its geometry.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width.max(1), size.height);

        let epoch = self.controller.state().request_epoch();
        if epoch != self.scroll_epoch {
            self.grid_scroll = 0;
            self.scroll_epoch = epoch;
        }

        let geometry = FrameGeometry::compute(
            area,
            self.controller.state(),
            &self.categories,
            self.grid_scroll,
        );
        self.grid_scroll = geometry.first_row;
        self.controller.set_columns(geometry.columns);

        let view = ExploreView {
            state: self.controller.state(),
            focus: self.controller.focus(),
            input: &self.input,
            input_focused: self.detail.is_none() && !self.controller.focus().is_focused(),
            detail: self.detail.as_ref(),
            palette: &self.palette,
            today: self.today,
        };
        self.terminal
            .draw(|frame| render_explore(frame, &view, &geometry))?;

        self.geometry = Some(geometry);
        Ok(())
    }
}

fn click_target(geometry: &FrameGeometry, column: u16, row: u16) -> ClickTarget {
    if let Some(index) = geometry.card_at(column, row) {
        ClickTarget::Card(index)
    } else if let Some(chip) = geometry.chip_at(column, row) {
        ClickTarget::Chip(chip.category.clone())
    } else if geometry.load_more_at(column, row) {
        ClickTarget::LoadMore
    } else if geometry.clear_at(column, row) {
        ClickTarget::Clear
    } else if geometry.search_at(column, row) {
        ClickTarget::Search
    } else {
        ClickTarget::Nothing
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B, D, C> TuiApp<B, D, C>
where
    B: Backend,
    D: FetchDispatcher,
    C: Clock,
{
    pub(crate) fn controller(&self) -> &SearchController<D, C> {
        &self.controller
    }

    pub(crate) fn controller_mut(&mut self) -> &mut SearchController<D, C> {
        &mut self.controller
    }

    pub(crate) fn input(&self) -> &TextInput {
        &self.input
    }

    pub(crate) fn detail(&self) -> Option<&DetailRequest> {
        self.detail.as_ref()
    }

    pub(crate) fn grid_scroll(&self) -> usize {
        self.grid_scroll
    }

    pub(crate) fn key_context_test(&self) -> KeyContext {
        self.key_context()
    }

    pub(crate) fn poll_timeout_test(&self) -> Duration {
        self.poll_timeout()
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    pub(crate) fn process_background_test(&mut self) -> bool {
        self.process_background()
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn terminal_mut_test(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub(crate) fn geometry(&self) -> Option<&FrameGeometry> {
        self.geometry.as_ref()
    }
}

// ===== Entry point =====

/// Launch settings that shape the first frame.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Page size and debounce.
    pub settings: SearchSettings,
    /// Colour theme.
    pub theme: Theme,
    /// Disable colours regardless of theme.
    pub no_color: bool,
    /// Simulated provider latency.
    pub latency: Duration,
    /// Initial search text.
    pub query: Option<String>,
    /// Initial category filter.
    pub category: Option<String>,
    /// Reference day for relative dates.
    pub today: NaiveDate,
}

/// Initialize and run the explore page against `provider`.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit. Logging must be initialized by the caller.
pub fn run_with_provider(
    provider: Arc<dyn ResultProvider>,
    options: LaunchOptions,
) -> Result<(), TuiError> {
    let categories = provider.categories();
    let dispatcher = ThreadedDispatcher::new(provider, options.latency);
    let mut controller = SearchController::new(dispatcher, SystemClock, options.settings);
    controller.preset(
        options.query.as_deref().unwrap_or(""),
        options.category.as_deref(),
    );
    let palette = Palette::new(options.theme, ColorConfig::from_env_and_args(options.no_color));

    let terminal = setup_terminal()?;
    let mut app = TuiApp::new(terminal, controller, categories, palette, options.today);

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    restore_terminal()?;
    result
}

/// Enter raw mode, the alternate screen and mouse capture.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(crossterm::event::EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
