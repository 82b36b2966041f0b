//! Input handling for the TUI.
//!
//! Processes keyboard events and updates wizard state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::wizard::{ProfileField, WizardStep};
use crate::WizardApp;

/// Handle keyboard events.
pub fn handle_events(key: KeyEvent, app: &mut WizardApp) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The error overlay replaces the screen; any dismiss key is the retry
    // affordance (clears the error, control returns to the user)
    if app.error.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('r')) {
            app.dismiss_error();
        }
        return;
    }

    // While a screen-level call is in flight nothing else is accepted
    if app.is_blocked() {
        return;
    }

    match app.step {
        WizardStep::Profile => handle_profile(key, app),
        WizardStep::ValidateAnalysis => handle_validate_analysis(key, app),
        WizardStep::ValidateTows => handle_validate_tows(key, app),
        WizardStep::Report => handle_report(key, app),
    }
}

/// Screen 1: the profile form.
fn handle_profile(key: KeyEvent, app: &mut WizardApp) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => app.submit_profile(),
        KeyCode::Down | KeyCode::Tab => app.profile_focus_next(),
        KeyCode::Up | KeyCode::BackTab => app.profile_focus_prev(),
        KeyCode::Left if app.profile_focus == ProfileField::Sector => app.sector_prev(),
        KeyCode::Right if app.profile_focus == ProfileField::Sector => app.sector_next(),
        KeyCode::Backspace => app.profile_backspace(),
        KeyCode::Char(c) => app.profile_input(c),
        _ => {}
    }
}

/// Screen 2: SWOT/PESTLE validation and editing.
fn handle_validate_analysis(key: KeyEvent, app: &mut WizardApp) {
    // The inline editor captures all input while open
    if app.edit.is_some() {
        match key.code {
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => {
                if let Some(edit) = app.edit.as_mut() {
                    edit.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(edit) = app.edit.as_mut() {
                    edit.buffer.push(c);
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.submit_analysis(),
        KeyCode::Left => app.category_prev(),
        KeyCode::Right => app.category_next(),
        KeyCode::Up => app.item_prev(),
        KeyCode::Down => app.item_next(),
        KeyCode::Char('a') => app.begin_add_factor(),
        KeyCode::Char('e') => app.begin_edit_factor(),
        KeyCode::Char('d') => app.delete_focused_factor(),
        KeyCode::Char('i') => app.cycle_focused_impact(),
        KeyCode::Char('+' | '=') => app.adjust_focused_priority(1),
        KeyCode::Char('-') => app.adjust_focused_priority(-1),
        KeyCode::Char('g') => {
            let category = app.current_category();
            app.generate_more(category);
        }
        _ => {}
    }
}

/// Screen 4: TOWS validation.
fn handle_validate_tows(key: KeyEvent, app: &mut WizardApp) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.submit_tows(),
        KeyCode::Up => app.tows_prev(),
        KeyCode::Down => app.tows_next(),
        KeyCode::Char('i') => app.cycle_focused_tows_impact(),
        KeyCode::Char('+' | '=') => app.adjust_focused_tows_priority(1),
        KeyCode::Char('-') => app.adjust_focused_tows_priority(-1),
        _ => {}
    }
}

/// Screen 5: the compiled report.
fn handle_report(key: KeyEvent, app: &mut WizardApp) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Char('x') => app.export_report(),
        KeyCode::Char('n') => app.restart(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}
