/// Keyboard to action mapping
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sr3d_core::Action;

/// Translate a key press into an action. `step` is the momentum change in
/// degrees per second for the rotation keys.
pub fn action_for_key(key: &KeyEvent, step: f32) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('0') => Action::ResetAll,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('w') | KeyCode::Up => Action::Pitch(step),
        KeyCode::Char('x') | KeyCode::Down => Action::Pitch(-step),
        KeyCode::Char('a') | KeyCode::Left => Action::Yaw(-step),
        KeyCode::Char('d') | KeyCode::Right => Action::Yaw(step),
        KeyCode::Char('e') => Action::Roll(step),
        KeyCode::Char('r') => Action::Roll(-step),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(action_for_key(&press(KeyCode::Up), 2.0), Some(Action::Pitch(2.0)));
        assert_eq!(action_for_key(&press(KeyCode::Char('x')), 2.0), Some(Action::Pitch(-2.0)));
        assert_eq!(action_for_key(&press(KeyCode::Left), 1.0), Some(Action::Yaw(-1.0)));
        assert_eq!(action_for_key(&press(KeyCode::Char('d')), 1.0), Some(Action::Yaw(1.0)));
        assert_eq!(action_for_key(&press(KeyCode::Char('e')), 1.0), Some(Action::Roll(1.0)));
        assert_eq!(action_for_key(&press(KeyCode::Char('r')), 1.0), Some(Action::Roll(-1.0)));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(action_for_key(&press(KeyCode::Esc), 1.0), Some(Action::Quit));
        assert_eq!(action_for_key(&press(KeyCode::Char(' ')), 1.0), Some(Action::ResetAll));
        assert_eq!(action_for_key(&press(KeyCode::Char('s')), 1.0), Some(Action::Stop));
        assert_eq!(
            action_for_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 1.0),
            Some(Action::Quit)
        );
        assert_eq!(action_for_key(&press(KeyCode::Char('z')), 1.0), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(&key, 1.0), None);
    }
}
