//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Search field
    /// Run the current query now, skipping the debounce. Default: Enter
    SubmitSearch,
    /// Clear the search text and requery. Default: Esc (in the field)
    ClearSearch,
    /// Move keyboard focus into the result grid. Default: Tab
    FocusGrid,

    // Grid navigation
    /// Focus the item to the left. Default: ←
    MoveLeft,
    /// Focus the item to the right. Default: →
    MoveRight,
    /// Focus the item one row up. Default: ↑
    MoveUp,
    /// Focus the item one row down. Default: ↓
    MoveDown,
    /// Open the focused item. Default: Enter/Space
    Activate,
    /// Drop grid focus and return to the search field. Default: Esc (in the grid)
    Unfocus,

    // Results
    /// Fetch the next page. Default: Ctrl+n, m (in the grid)
    LoadMore,
    /// Select the next category chip. Default: Ctrl+→, ] (in the grid)
    NextCategory,
    /// Select the previous category chip. Default: Ctrl+←, [ (in the grid)
    PrevCategory,
    /// Select the "Todos" chip. Default: Ctrl+a
    AllCategories,

    // Detail overlay
    /// Close the detail overlay. Default: Esc/Enter/q
    CloseDetail,

    // Application
    /// Exit the application. Default: Ctrl+c/Ctrl+q
    Quit,
}

impl KeyAction {
    /// Grid key this action maps to, if it is a grid navigation action.
    pub fn as_grid_key(self) -> Option<crate::state::GridKey> {
        use crate::state::GridKey;

        match self {
            KeyAction::FocusGrid => Some(GridKey::Tab),
            KeyAction::MoveLeft => Some(GridKey::Left),
            KeyAction::MoveRight => Some(GridKey::Right),
            KeyAction::MoveUp => Some(GridKey::Up),
            KeyAction::MoveDown => Some(GridKey::Down),
            KeyAction::Activate => Some(GridKey::Activate),
            KeyAction::Unfocus => Some(GridKey::Escape),
            _ => None,
        }
    }
}
