//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::GradientApp;

/// Angle step for Shift+arrow.
const COARSE_ANGLE_STEP: i64 = 15;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut GradientApp, key: KeyEvent) {
    // Windows reports releases too; act on presses only.
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Open hex editor captures everything else
    if app.stops.editing().is_some() {
        match key.code {
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => app.edit_backspace(),
            KeyCode::Char(ch) => app.edit_push(ch),
            _ => {}
        }
        return;
    }

    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        COARSE_ANGLE_STEP
    } else {
        1
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('t') => app.toggle_kind(),
        KeyCode::Left | KeyCode::Char('h') => app.nudge_angle(-step),
        KeyCode::Right | KeyCode::Char('l') => app.nudge_angle(step),
        KeyCode::Char('H') => app.nudge_angle(-COARSE_ANGLE_STEP),
        KeyCode::Char('L') => app.nudge_angle(COARSE_ANGLE_STEP),
        KeyCode::Up | KeyCode::Char('k') => app.stops.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.stops.select_next(),
        KeyCode::Char('a') | KeyCode::Char('+') => app.add_stop(),
        KeyCode::Char('d') | KeyCode::Char('-') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('r') => app.randomize(),
        KeyCode::Char('c') | KeyCode::Char('y') => app.copy_current_css(),
        KeyCode::Char('s') => app.save_preset(),
        _ => {}
    }
}
