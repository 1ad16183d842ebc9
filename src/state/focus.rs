//! Keyboard focus over the result grid (pure).
//!
//! Focus is a sum type: either nothing is focused or exactly one valid index
//! is. Mouse hover is tracked next to it but never moves focus.

use tracing::trace;

// ===== GridFocus =====

/// Keyboard focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridFocus {
    /// No item has keyboard focus.
    #[default]
    Unfocused,
    /// Item at this index has keyboard focus.
    Focused(usize),
}

// ===== GridKey =====

/// Keys the grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKey {
    /// Enter the grid at the first item.
    Tab,
    /// Previous item.
    Left,
    /// Next item.
    Right,
    /// Same column, previous row.
    Up,
    /// Same column, next row.
    Down,
    /// Enter/Space on the focused item.
    Activate,
    /// Leave the grid.
    Escape,
}

// ===== NavOutcome =====

/// Result of feeding a key to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus moved to this index.
    Moved(usize),
    /// Focus was dropped.
    Unfocused,
    /// The item at this index was activated. Focus is unchanged.
    Activate(usize),
    /// Nothing happened.
    Ignored,
}

// ===== FocusNavigator =====

/// Tracks the keyboard-selected grid item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusNavigator {
    focus: GridFocus,
    hovered: Option<usize>,
    columns: usize,
}

impl Default for FocusNavigator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FocusNavigator {
    /// Unfocused navigator over a grid with `columns` columns (at least 1).
    pub fn new(columns: usize) -> Self {
        Self {
            focus: GridFocus::Unfocused,
            hovered: None,
            columns: columns.max(1),
        }
    }

    /// Current keyboard focus.
    pub fn focus(&self) -> GridFocus {
        self.focus
    }

    /// Focused index, if any.
    pub fn selected_index(&self) -> Option<usize> {
        match self.focus {
            GridFocus::Focused(i) => Some(i),
            GridFocus::Unfocused => None,
        }
    }

    /// Focused index, or `-1` when unfocused.
    pub fn selected_index_signed(&self) -> isize {
        self.selected_index()
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Whether any item has keyboard focus.
    pub fn is_focused(&self) -> bool {
        matches!(self.focus, GridFocus::Focused(_))
    }

    /// Index under the mouse pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Column count used for up/down moves.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Update the column count. Applied to the next up/down move.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Record mouse hover. Never changes keyboard focus.
    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    /// Drop focus and hover. Called when the item list is replaced.
    pub fn reset(&mut self) {
        self.focus = GridFocus::Unfocused;
        self.hovered = None;
    }

    /// Apply a key to a grid of `len` items.
    ///
    /// `interactive` is false while there is nothing to navigate (no items,
    /// or the first page of a query is still loading); every key is then
    /// ignored.
    pub fn handle(&mut self, key: GridKey, len: usize, interactive: bool) -> NavOutcome {
        if !interactive || len == 0 {
            return NavOutcome::Ignored;
        }

        let outcome = match (self.focus, key) {
            (GridFocus::Unfocused, GridKey::Tab) => self.move_to(0),
            (GridFocus::Unfocused, _) => NavOutcome::Ignored,
            (GridFocus::Focused(i), GridKey::Right) if i + 1 < len => self.move_to(i + 1),
            (GridFocus::Focused(i), GridKey::Left) if i >= 1 => self.move_to(i - 1),
            (GridFocus::Focused(i), GridKey::Down) if i + self.columns < len => {
                self.move_to(i + self.columns)
            }
            (GridFocus::Focused(i), GridKey::Up) if i >= self.columns => {
                self.move_to(i - self.columns)
            }
            (GridFocus::Focused(i), GridKey::Activate) if i < len => NavOutcome::Activate(i),
            (GridFocus::Focused(_), GridKey::Escape) => {
                self.focus = GridFocus::Unfocused;
                NavOutcome::Unfocused
            }
            (GridFocus::Focused(_), _) => NavOutcome::Ignored,
        };

        trace!(?key, ?outcome, columns = self.columns, len, "Grid key handled");
        outcome
    }

    fn move_to(&mut self, index: usize) -> NavOutcome {
        self.focus = GridFocus::Focused(index);
        NavOutcome::Moved(index)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "focus_tests.rs"]
mod tests;
