use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the play mode to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    Restart,
    /// Jump straight to a tick rate; the digit row stands in for a speed
    /// slider
    SetSpeed(u32),
    SpeedUp,
    SpeedDown,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => char_action(c),
            _ => KeyAction::None,
        }
    }
}

fn char_action(c: char) -> KeyAction {
    match c.to_ascii_lowercase() {
        'w' => KeyAction::Steer(Direction::Up),
        's' => KeyAction::Steer(Direction::Down),
        'a' => KeyAction::Steer(Direction::Left),
        'd' => KeyAction::Steer(Direction::Right),
        'p' | ' ' => KeyAction::TogglePause,
        'r' => KeyAction::Restart,
        'q' => KeyAction::Quit,
        '+' | '=' => KeyAction::SpeedUp,
        '-' => KeyAction::SpeedDown,
        digit @ '1'..='9' => KeyAction::SetSpeed(digit as u32 - '0' as u32),
        _ => KeyAction::None,
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrows_steer() {
        assert_eq!(press(KeyCode::Up), KeyAction::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_steers_in_both_cases() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Steer(Direction::Right));
        assert_eq!(press(KeyCode::Char('W')), KeyAction::Steer(Direction::Up));
    }

    #[test]
    fn test_pause_and_restart() {
        assert_eq!(press(KeyCode::Char('p')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
    }

    #[test]
    fn test_speed_controls() {
        assert_eq!(press(KeyCode::Char('+')), KeyAction::SpeedUp);
        assert_eq!(press(KeyCode::Char('=')), KeyAction::SpeedUp);
        assert_eq!(press(KeyCode::Char('-')), KeyAction::SpeedDown);

        for (key, rate) in [('1', 1), ('5', 5), ('9', 9)] {
            assert_eq!(press(KeyCode::Char(key)), KeyAction::SetSpeed(rate));
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unmapped_keys_do_nothing() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Char('0')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }
}
