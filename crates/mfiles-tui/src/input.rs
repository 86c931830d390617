use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mfiles_core::action::Action;
use mfiles_core::config::keymap::Keymap;
use mfiles_core::event::Command;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a core Command.
    Command(Command),
    /// Open the help overlay.
    ShowHelp,
    /// Close the help overlay.
    HideHelp,
    /// Quit the application.
    Quit,
    /// No action.
    None,
}

/// Processes a key event in the given mode.
pub fn handle_key(key: KeyEvent, mode: &AppMode, keymap: &Keymap) -> InputAction {
    match mode {
        AppMode::Normal => handle_normal_key(key, keymap),
        AppMode::Dialog => handle_dialog_key(key),
        AppMode::Help => handle_help_key(key),
    }
}

/// Returns the keymap name for a key event, e.g. `"j"`, `"Space"` or
/// `"Shift+Down"`. Keys the keymap cannot name yield `None`.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up if shift => "Shift+Up".to_string(),
        KeyCode::Down if shift => "Shift+Down".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        _ => return None,
    };
    Some(name)
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    match action {
        Action::Help => InputAction::ShowHelp,
        Action::Quit => InputAction::Quit,
        other => other
            .command()
            .map(InputAction::Command)
            .unwrap_or(InputAction::None),
    }
}

fn handle_normal_key(key: KeyEvent, keymap: &Keymap) -> InputAction {
    // Ctrl+C always quits, whatever the keymap says
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
        return InputAction::None;
    }

    key_name(&key)
        .and_then(|name| keymap.action_for_key(&name))
        .map(action_to_input_action)
        .unwrap_or(InputAction::None)
}

/// The new-file dialog takes raw text; only editing keys are special.
fn handle_dialog_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Esc => InputAction::Command(Command::DialogCancel),
        KeyCode::Enter => InputAction::Command(Command::DialogConfirm),
        KeyCode::Backspace => InputAction::Command(Command::DialogBackspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Command(Command::DialogTextInput(c))
        }
        _ => InputAction::None,
    }
}

fn handle_help_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => InputAction::HideHelp,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn normal(event: KeyEvent) -> InputAction {
        handle_key(event, &AppMode::Normal, &Keymap::default())
    }

    // --- Key names ---

    #[test]
    fn key_name_special_keys() {
        assert_eq!(key_name(&key(KeyCode::Char(' '))).as_deref(), Some("Space"));
        assert_eq!(key_name(&key(KeyCode::Enter)).as_deref(), Some("Enter"));
        assert_eq!(key_name(&key(KeyCode::Esc)).as_deref(), Some("Esc"));
        assert_eq!(key_name(&key(KeyCode::Down)).as_deref(), Some("Down"));
        assert_eq!(
            key_name(&key_with_mod(KeyCode::Up, KeyModifiers::SHIFT)).as_deref(),
            Some("Shift+Up")
        );
        assert_eq!(key_name(&key(KeyCode::F(5))), None);
    }

    #[test]
    fn key_name_uppercase_char_keeps_case() {
        let event = key_with_mod(KeyCode::Char('J'), KeyModifiers::SHIFT);
        assert_eq!(key_name(&event).as_deref(), Some("J"));
    }

    // --- Normal mode ---

    #[test]
    fn normal_j_and_down_move_down() {
        assert_eq!(normal(key(KeyCode::Char('j'))), InputAction::Command(Command::MoveDown));
        assert_eq!(normal(key(KeyCode::Down)), InputAction::Command(Command::MoveDown));
    }

    #[test]
    fn normal_k_and_up_move_up() {
        assert_eq!(normal(key(KeyCode::Char('k'))), InputAction::Command(Command::MoveUp));
        assert_eq!(normal(key(KeyCode::Up)), InputAction::Command(Command::MoveUp));
    }

    #[test]
    fn normal_shift_extends() {
        assert_eq!(
            normal(key_with_mod(KeyCode::Down, KeyModifiers::SHIFT)),
            InputAction::Command(Command::ExtendDown)
        );
        assert_eq!(
            normal(key_with_mod(KeyCode::Char('K'), KeyModifiers::SHIFT)),
            InputAction::Command(Command::ExtendUp)
        );
    }

    #[test]
    fn normal_enter_and_l_enter() {
        assert_eq!(normal(key(KeyCode::Enter)), InputAction::Command(Command::Enter));
        assert_eq!(normal(key(KeyCode::Char('l'))), InputAction::Command(Command::Enter));
    }

    #[test]
    fn normal_space_pins() {
        assert_eq!(normal(key(KeyCode::Char(' '))), InputAction::Command(Command::Pin));
    }

    #[test]
    fn normal_clipboard_keys() {
        assert_eq!(normal(key(KeyCode::Char('y'))), InputAction::Command(Command::StageCopy));
        assert_eq!(normal(key(KeyCode::Char('x'))), InputAction::Command(Command::StageCut));
        assert_eq!(normal(key(KeyCode::Char('p'))), InputAction::Command(Command::Paste));
    }

    #[test]
    fn normal_n_opens_dialog() {
        assert_eq!(
            normal(key(KeyCode::Char('n'))),
            InputAction::Command(Command::NewFileDialogOpen)
        );
    }

    #[test]
    fn normal_escape_and_toggle_hidden() {
        assert_eq!(normal(key(KeyCode::Esc)), InputAction::Command(Command::Escape));
        assert_eq!(normal(key(KeyCode::Char('.'))), InputAction::Command(Command::ToggleHidden));
    }

    #[test]
    fn normal_help_and_quit() {
        assert_eq!(normal(key(KeyCode::Char('?'))), InputAction::ShowHelp);
        assert_eq!(normal(key(KeyCode::Char('q'))), InputAction::Quit);
    }

    #[test]
    fn normal_ctrl_c_quits() {
        let event = key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(normal(event), InputAction::Quit);
    }

    #[test]
    fn normal_ctrl_combinations_ignored() {
        let event = key_with_mod(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(normal(event), InputAction::None);
    }

    #[test]
    fn normal_unbound_key_is_none() {
        assert_eq!(normal(key(KeyCode::Char('z'))), InputAction::None);
        assert_eq!(normal(key(KeyCode::F(1))), InputAction::None);
    }

    // --- Dialog mode ---

    #[test]
    fn dialog_chars_become_text_input() {
        let km = Keymap::default();
        let action = handle_key(key(KeyCode::Char('q')), &AppMode::Dialog, &km);
        assert_eq!(action, InputAction::Command(Command::DialogTextInput('q')));

        let action = handle_key(key(KeyCode::Char(' ')), &AppMode::Dialog, &km);
        assert_eq!(action, InputAction::Command(Command::DialogTextInput(' ')));
    }

    #[test]
    fn dialog_editing_keys() {
        let km = Keymap::default();
        let cases = [
            (KeyCode::Esc, Command::DialogCancel),
            (KeyCode::Enter, Command::DialogConfirm),
            (KeyCode::Backspace, Command::DialogBackspace),
        ];
        for (code, expected) in cases {
            let action = handle_key(key(code), &AppMode::Dialog, &km);
            assert_eq!(action, InputAction::Command(expected));
        }
    }

    #[test]
    fn dialog_arrows_ignored() {
        let km = Keymap::default();
        let action = handle_key(key(KeyCode::Down), &AppMode::Dialog, &km);
        assert_eq!(action, InputAction::None);
    }

    // --- Help mode ---

    #[test]
    fn help_closes_on_esc_q_question() {
        let km = Keymap::default();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            let action = handle_key(key(code), &AppMode::Help, &km);
            assert_eq!(action, InputAction::HideHelp);
        }
    }

    #[test]
    fn help_other_keys_ignored() {
        let km = Keymap::default();
        let action = handle_key(key(KeyCode::Char('j')), &AppMode::Help, &km);
        assert_eq!(action, InputAction::None);
    }
}
