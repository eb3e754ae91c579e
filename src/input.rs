//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] mutations.  Anything with a side
//! effect outside the app (persisting, opening a browser) is returned as an
//! [`Action`] for the main loop to carry out.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in the handler for the relevant focus.
//! 3. Update the help text in [`crate::ui`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Dialog, Focus};
use crate::worker::Command;

/// Side effect requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Command),
    Open(String),
}

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return None;
    }

    if let Some(dialog) = app.dialog {
        return handle_dialog(app, dialog, key.code);
    }

    match key.code {
        KeyCode::Tab => {
            app.focus_next();
            return None;
        }
        KeyCode::BackTab => {
            app.focus_previous();
            return None;
        }
        _ => {}
    }

    match app.focus {
        Focus::Path | Focus::Tag => handle_text(app, key.code),
        Focus::List => handle_list(app, key.code),
    }
}

fn handle_dialog(app: &mut App, dialog: Dialog, code: KeyCode) -> Option<Action> {
    match dialog {
        Dialog::MissingInput => {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                app.dismiss_dialog();
            }
            None
        }
        Dialog::ConfirmClear => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                Some(Action::Dispatch(app.confirm_clear_all()))
            }
            _ => {
                app.dismiss_dialog();
                None
            }
        },
    }
}

fn handle_text(app: &mut App, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter if app.focus == Focus::Path => app.focus_next(),
        KeyCode::Enter => return app.save_draft().map(Action::Dispatch),
        KeyCode::Esc => app.focus_list(),
        _ => {}
    }
    None
}

fn handle_list(app: &mut App, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter | KeyCode::Char('o') => return app.selected_url().map(Action::Open),
        KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => {
            return app.remove_selected().map(Action::Dispatch)
        }
        KeyCode::Char('C') => app.request_clear_all(),
        _ => {}
    }
    None
}
