//! Key mapping from terminal events to game commands.

use crate::types::{GameStatus, InputCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the engine
    Command(InputCommand),
    /// Flip the music preference and persist it
    ToggleMusic,
}

/// Map keyboard input to a front-end action.
///
/// Reset is only offered once the game is over, so a stray `r` cannot throw
/// away a running game.
pub fn map_key(key: KeyEvent, status: GameStatus) -> Option<KeyAction> {
    let command = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            InputCommand::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            InputCommand::MoveRight
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            InputCommand::MoveDown
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => InputCommand::Rotate,

        // Actions
        KeyCode::Char(' ') => InputCommand::HardDrop,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => InputCommand::Pause,

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') if status == GameStatus::GameOver => InputCommand::Reset,

        KeyCode::Char('m') | KeyCode::Char('M') => return Some(KeyAction::ToggleMusic),

        _ => return None,
    };
    Some(KeyAction::Command(command))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
