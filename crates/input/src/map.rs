//! Key mapping from terminal events to commands.

use crate::types::{Command, Direction, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Hidden teacher panel key. Three quick presses open the panel.
pub const PANEL_KEY: KeyCode = KeyCode::F(2);

/// Map a key press to a command for the current input mode.
pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == PANEL_KEY {
        return Some(Command::PanelTap);
    }

    match mode {
        InputMode::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NewGame),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(Command::Resume)
            }
            _ => None,
        },

        InputMode::Choice => match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('w') => {
                Some(Command::Cursor(Direction::Up))
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('s') => {
                Some(Command::Cursor(Direction::Down))
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
            KeyCode::Char(c @ '1'..='9') => Some(Command::Choose(c as u8 - b'1')),
            _ => None,
        },

        InputMode::Reorder => {
            let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
            match key.code {
                KeyCode::Up if shifted => Some(Command::Shift(Direction::Up)),
                KeyCode::Down if shifted => Some(Command::Shift(Direction::Down)),
                KeyCode::Char('K') => Some(Command::Shift(Direction::Up)),
                KeyCode::Char('J') => Some(Command::Shift(Direction::Down)),
                KeyCode::Up | KeyCode::Char('k') => Some(Command::Cursor(Direction::Up)),
                KeyCode::Down | KeyCode::Char('j') => Some(Command::Cursor(Direction::Down)),
                KeyCode::Enter => Some(Command::Confirm),
                _ => None,
            }
        }

        InputMode::Text => match key.code {
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Tab => Some(Command::ToggleVoice),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Command::Char(c))
            }
            _ => None,
        },

        InputMode::Cinematic => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Some(Command::SkipCinematic),
            _ => None,
        },

        InputMode::Finished => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::PlayAgain),
            _ => None,
        },

        InputMode::Panel => match key.code {
            KeyCode::Char(c @ '1'..='4') => Some(Command::PanelSelectLevel(c as u8 - b'0')),
            KeyCode::Char('o') | KeyCode::Char('O') => Some(Command::PanelToggleOverride),
            KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::PanelReset),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::PanelClose),
            _ => None,
        },
    }
}

/// Check if key should quit the game.
///
/// `q` is a letter like any other while typing an answer; Ctrl+C always quits.
pub fn should_quit(mode: InputMode, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    mode != InputMode::Text && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(map_key(InputMode::Menu, key(KeyCode::Enter)), Some(Command::NewGame));
        assert_eq!(map_key(InputMode::Menu, key(KeyCode::Char('c'))), Some(Command::Resume));
        assert_eq!(map_key(InputMode::Menu, key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_choice_keys() {
        assert_eq!(
            map_key(InputMode::Choice, key(KeyCode::Down)),
            Some(Command::Cursor(Direction::Down))
        );
        assert_eq!(
            map_key(InputMode::Choice, key(KeyCode::Left)),
            Some(Command::Cursor(Direction::Up))
        );
        assert_eq!(map_key(InputMode::Choice, key(KeyCode::Char('1'))), Some(Command::Choose(0)));
        assert_eq!(map_key(InputMode::Choice, key(KeyCode::Char('3'))), Some(Command::Choose(2)));
        assert_eq!(map_key(InputMode::Choice, key(KeyCode::Enter)), Some(Command::Confirm));
    }

    #[test]
    fn test_reorder_keys() {
        assert_eq!(
            map_key(InputMode::Reorder, KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)),
            Some(Command::Shift(Direction::Up))
        );
        assert_eq!(
            map_key(InputMode::Reorder, key(KeyCode::Char('J'))),
            Some(Command::Shift(Direction::Down))
        );
        assert_eq!(
            map_key(InputMode::Reorder, key(KeyCode::Up)),
            Some(Command::Cursor(Direction::Up))
        );
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(map_key(InputMode::Text, key(KeyCode::Char('q'))), Some(Command::Char('q')));
        assert_eq!(map_key(InputMode::Text, key(KeyCode::Char(' '))), Some(Command::Char(' ')));
        assert_eq!(map_key(InputMode::Text, key(KeyCode::Backspace)), Some(Command::Backspace));
        assert_eq!(map_key(InputMode::Text, key(KeyCode::Tab)), Some(Command::ToggleVoice));
        assert_eq!(
            map_key(InputMode::Text, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_screen_keys() {
        assert_eq!(
            map_key(InputMode::Cinematic, key(KeyCode::Char(' '))),
            Some(Command::SkipCinematic)
        );
        assert_eq!(map_key(InputMode::Finished, key(KeyCode::Enter)), Some(Command::PlayAgain));
        assert_eq!(
            map_key(InputMode::Panel, key(KeyCode::Char('2'))),
            Some(Command::PanelSelectLevel(2))
        );
        assert_eq!(map_key(InputMode::Panel, key(KeyCode::Char('5'))), None);
        assert_eq!(
            map_key(InputMode::Panel, key(KeyCode::Char('o'))),
            Some(Command::PanelToggleOverride)
        );
        assert_eq!(map_key(InputMode::Panel, key(KeyCode::Esc)), Some(Command::PanelClose));
    }

    #[test]
    fn test_panel_key_everywhere() {
        for mode in [InputMode::Menu, InputMode::Text, InputMode::Finished, InputMode::Panel] {
            assert_eq!(map_key(mode, key(PANEL_KEY)), Some(Command::PanelTap));
        }
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(InputMode::Menu, key(KeyCode::Char('q'))));
        assert!(!should_quit(InputMode::Text, key(KeyCode::Char('q'))));
        assert!(should_quit(
            InputMode::Text,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
        assert!(!should_quit(InputMode::Choice, key(KeyCode::Char('x'))));
    }
}
