use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A direction key went down this frame
    Press(Direction),
    Restart,
    Quit,
    None,
}

/// Maps raw key events to game actions: arrows or WASD steer, `r` restarts,
/// `q`/Esc/Ctrl-C quit.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => KeyAction::Press(Direction::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => KeyAction::Press(Direction::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => KeyAction::Press(Direction::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => KeyAction::Press(Direction::Right),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r' | 'R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
