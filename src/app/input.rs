//! Key bindings for the widget

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions available outside of text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Unlock the next hint
    RevealHint,
    /// Open the question box
    Ask,
    /// Open the : command line
    Command,
    /// Minimize or restore the widget
    ToggleWidget,
    /// Count a click in the code editor
    EditorActivity,
    /// Show or hide the popup
    Popup,
    Help,
    ScrollUp,
    ScrollDown,
    /// Close the overlay
    Back,
    Quit,
}

/// Map a key press in normal mode to an action
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('n') | KeyCode::Enter => Some(Action::RevealHint),
        KeyCode::Char('i') => Some(Action::Ask),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('m') | KeyCode::Char(' ') => Some(Action::ToggleWidget),
        KeyCode::Char('a') => Some(Action::EditorActivity),
        KeyCode::Char('p') => Some(Action::Popup),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
