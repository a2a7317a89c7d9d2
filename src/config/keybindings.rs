//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Plain printable characters are left unbound so they reach the search
/// input; every command uses a function key or a Ctrl chord.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Event kind and state are ignored so key repeats and terminals that
    /// report lock-key state still match.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = KeyEvent {
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
            ..key
        };
        self.bindings.get(&normalized).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    fn insert(&mut self, code: crossterm::event::KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bind(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::KeyCode;

        let mut kb = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Result list
        kb.insert(KeyCode::Up, none, KeyAction::SelectUp);
        kb.insert(KeyCode::Down, none, KeyAction::SelectDown);
        kb.insert(KeyCode::PageUp, none, KeyAction::PageUp);
        kb.insert(KeyCode::PageDown, none, KeyAction::PageDown);
        kb.insert(KeyCode::Home, ctrl, KeyAction::SelectFirst);
        kb.insert(KeyCode::End, ctrl, KeyAction::SelectLast);

        // Search input
        kb.insert(KeyCode::Left, none, KeyAction::CursorLeft);
        kb.insert(KeyCode::Right, none, KeyAction::CursorRight);
        kb.insert(KeyCode::Home, none, KeyAction::CursorHome);
        kb.insert(KeyCode::End, none, KeyAction::CursorEnd);
        kb.insert(KeyCode::Backspace, none, KeyAction::Backspace);
        kb.insert(KeyCode::Delete, none, KeyAction::DeleteForward);
        kb.insert(KeyCode::Char('u'), ctrl, KeyAction::ClearSearch);

        // Query control
        kb.insert(KeyCode::F(5), none, KeyAction::Refresh);
        kb.insert(KeyCode::Char('r'), ctrl, KeyAction::Refresh);
        kb.insert(KeyCode::F(3), none, KeyAction::CycleSort);
        kb.insert(KeyCode::Char('s'), ctrl, KeyAction::CycleSort);
        kb.insert(KeyCode::F(2), none, KeyAction::OpenFilters);
        kb.insert(KeyCode::Char('f'), ctrl, KeyAction::OpenFilters);

        // Cart
        kb.insert(KeyCode::Enter, none, KeyAction::AddToCart);
        kb.insert(KeyCode::Char('a'), ctrl, KeyAction::AddToCart);
        kb.insert(KeyCode::F(4), none, KeyAction::ToggleCart);
        kb.insert(KeyCode::Char('t'), ctrl, KeyAction::ToggleCart);
        kb.insert(KeyCode::Char('x'), ctrl, KeyAction::RemoveFromCart);
        kb.insert(KeyCode::Char('o'), ctrl, KeyAction::PlaceOrder);

        // Application controls
        kb.insert(KeyCode::Esc, none, KeyAction::Back);
        kb.insert(KeyCode::Char('c'), ctrl, KeyAction::Quit);
        kb.insert(KeyCode::Char('q'), ctrl, KeyAction::Quit);

        kb
    }
}
