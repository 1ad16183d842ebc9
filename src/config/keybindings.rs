//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// Where keyboard input is currently routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Typing in the search field.
    SearchInput,
    /// Navigating the result grid.
    Grid,
    /// Detail overlay is open.
    Detail,
}

/// Maps keyboard events to domain actions, per input context.
///
/// Bindings in the `global` table apply everywhere and win over context
/// bindings. Unbound printable keys in the search field are text input and
/// are left to the caller.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    global: HashMap<KeyEvent, KeyAction>,
    contexts: HashMap<KeyContext, HashMap<KeyEvent, KeyAction>>,
}

impl KeyBindings {
    /// Look up the action for a key event in `context`.
    pub fn resolve(&self, key: KeyEvent, context: KeyContext) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let key = normalize(key);
        self.global.get(&key).copied().or_else(|| {
            self.contexts
                .get(&context)
                .and_then(|table| table.get(&key))
                .copied()
        })
    }

    fn bind(&mut self, context: KeyContext, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(KeyEvent::new(code, modifiers), action);
    }
}

/// Strip state and kind so lookups compare only code and modifiers.
fn normalize(key: KeyEvent) -> KeyEvent {
    KeyEvent::new(key.code, key.modifiers)
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyContext::{Detail, Grid, SearchInput};

        let mut bindings = Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        };

        // Application controls
        bindings.global.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );
        bindings.global.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        // Search field
        bindings.bind(SearchInput, KeyCode::Enter, KeyModifiers::NONE, KeyAction::SubmitSearch);
        bindings.bind(SearchInput, KeyCode::Esc, KeyModifiers::NONE, KeyAction::ClearSearch);
        bindings.bind(SearchInput, KeyCode::Tab, KeyModifiers::NONE, KeyAction::FocusGrid);
        bindings.bind(SearchInput, KeyCode::Down, KeyModifiers::NONE, KeyAction::FocusGrid);
        bindings.bind(
            SearchInput,
            KeyCode::Char('n'),
            KeyModifiers::CONTROL,
            KeyAction::LoadMore,
        );
        bindings.bind(
            SearchInput,
            KeyCode::Right,
            KeyModifiers::CONTROL,
            KeyAction::NextCategory,
        );
        bindings.bind(
            SearchInput,
            KeyCode::Left,
            KeyModifiers::CONTROL,
            KeyAction::PrevCategory,
        );
        bindings.bind(
            SearchInput,
            KeyCode::Char('a'),
            KeyModifiers::CONTROL,
            KeyAction::AllCategories,
        );

        // Grid navigation
        bindings.bind(Grid, KeyCode::Left, KeyModifiers::NONE, KeyAction::MoveLeft);
        bindings.bind(Grid, KeyCode::Right, KeyModifiers::NONE, KeyAction::MoveRight);
        bindings.bind(Grid, KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
        bindings.bind(Grid, KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        bindings.bind(Grid, KeyCode::Enter, KeyModifiers::NONE, KeyAction::Activate);
        bindings.bind(Grid, KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::Activate);
        bindings.bind(Grid, KeyCode::Esc, KeyModifiers::NONE, KeyAction::Unfocus);
        bindings.bind(Grid, KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::LoadMore);
        bindings.bind(Grid, KeyCode::Char('n'), KeyModifiers::CONTROL, KeyAction::LoadMore);
        bindings.bind(Grid, KeyCode::Char(']'), KeyModifiers::NONE, KeyAction::NextCategory);
        bindings.bind(Grid, KeyCode::Char('['), KeyModifiers::NONE, KeyAction::PrevCategory);
        bindings.bind(
            Grid,
            KeyCode::Char('a'),
            KeyModifiers::CONTROL,
            KeyAction::AllCategories,
        );

        // Detail overlay
        bindings.bind(Detail, KeyCode::Esc, KeyModifiers::NONE, KeyAction::CloseDetail);
        bindings.bind(Detail, KeyCode::Enter, KeyModifiers::NONE, KeyAction::CloseDetail);
        bindings.bind(Detail, KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::CloseDetail);

        bindings
    }
}
