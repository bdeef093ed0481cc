//! Key mapping for terminal play.
//!
//! 2048 is a discrete turn game, so there is no held-key handling: one key
//! press maps to at most one action.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Direction, GameAction};

/// Map a key press to a game action, if any
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
            Some(GameAction::Shift(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            Some(GameAction::Shift(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
            Some(GameAction::Shift(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            Some(GameAction::Shift(Direction::Down))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Quit on q, Esc, or Ctrl-C
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_arrows_map_to_shifts() {
        assert_eq!(
            handle_key_event(press(KeyCode::Left)),
            Some(GameAction::Shift(Direction::Left))
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Right)),
            Some(GameAction::Shift(Direction::Right))
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Up)),
            Some(GameAction::Shift(Direction::Up))
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Down)),
            Some(GameAction::Shift(Direction::Down))
        );
    }

    #[test]
    fn test_vim_and_wasd_aliases() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('h'))),
            Some(GameAction::Shift(Direction::Left))
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('s'))),
            Some(GameAction::Shift(Direction::Down))
        );
    }

    #[test]
    fn test_restart_and_unmapped_keys() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(press(KeyCode::Tab)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(press(KeyCode::Char('q'))));
        assert!(should_quit(press(KeyCode::Esc)));
        assert!(!should_quit(press(KeyCode::Char('c'))));

        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(should_quit(ctrl_c));
    }
}
