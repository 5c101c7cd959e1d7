//! Input handling
//!
//! Maps keyboard events to session operations with context-sensitive bindings.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::{ExportStart, FocusedWidget, Session, SkipReason};
use crate::unicode_handler::pop_grapheme;

/// Handle an input event
pub fn handle_event(event: Event, session: &mut Session) -> Result<()> {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, session)
        }
        Event::Paste(text) => {
            if session.focus == FocusedWidget::Input && session.color_edit.is_none() {
                let mut combined = session.state.text.clone();
                combined.push_str(&text);
                session.set_text(combined);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(key: KeyEvent, session: &mut Session) -> Result<()> {
    // Help overlay swallows everything
    if session.show_help {
        return handle_help_input(key, session);
    }

    // Colour editor
    if session.color_edit.is_some() {
        return handle_color_input(key, session);
    }

    // Global shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => {
                session.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('s') => {
                export(session);
                return Ok(());
            }
            KeyCode::Char('y') => {
                copy(session);
                return Ok(());
            }
            KeyCode::Char('r') => {
                session.reset();
                return Ok(());
            }
            KeyCode::Char('t') => {
                session.toggle_theme();
                return Ok(());
            }
            KeyCode::Char('u') => {
                session.toggle_mode();
                return Ok(());
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::F(1) => {
            session.show_help = true;
            return Ok(());
        }
        KeyCode::Tab => {
            session.focus = session.focus.next();
            return Ok(());
        }
        KeyCode::BackTab => {
            session.focus = session.focus.prev();
            return Ok(());
        }
        _ => {}
    }

    // Context-sensitive handling
    match session.focus {
        FocusedWidget::Input => handle_text_input(key, session),
        FocusedWidget::Settings => handle_settings_input(key, session),
    }
}

/// Handle input when help overlay is shown
fn handle_help_input(key: KeyEvent, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) => {
            session.show_help = false;
        }
        _ => {}
    }
    Ok(())
}

/// Handle typing into the main text box
fn handle_text_input(key: KeyEvent, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Backspace => session.pop_grapheme(),
        KeyCode::Enter => session.push_char('\n'),
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.set_text("");
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.push_char(c);
        }
        KeyCode::Esc => {
            session.focus = FocusedWidget::Settings;
        }
        _ => {}
    }
    Ok(())
}

/// Handle the settings panel
fn handle_settings_input(key: KeyEvent, session: &mut Session) -> Result<()> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => session.prev_setting(),
        KeyCode::Down | KeyCode::Char('j') => session.next_setting(),

        // Adjust settings
        KeyCode::Left | KeyCode::Char('h') => session.cycle_selected(false),
        KeyCode::Right | KeyCode::Char('l') => session.cycle_selected(true),
        KeyCode::Char(' ') => session.cycle_selected(true),
        KeyCode::Enter | KeyCode::Char('e') => {
            if session.selected_key().is_color() {
                session.start_color_edit();
            } else {
                session.cycle_selected(true);
            }
        }

        // Actions
        KeyCode::Char('m') => session.toggle_mode(),
        KeyCode::Char('t') => session.toggle_theme(),
        KeyCode::Char('r') => session.reset(),
        KeyCode::Char('s') | KeyCode::Char('S') => export(session),
        KeyCode::Char('c') | KeyCode::Char('C') => copy(session),
        KeyCode::Char('?') => session.show_help = true,
        KeyCode::Char('q') | KeyCode::Char('Q') => session.should_quit = true,
        KeyCode::Esc | KeyCode::Char('i') => session.focus = FocusedWidget::Input,

        _ => {}
    }
    Ok(())
}

/// Handle typing a hex colour
fn handle_color_input(key: KeyEvent, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Esc => session.cancel_color_edit(),
        KeyCode::Enter => session.commit_color_edit(),
        KeyCode::Backspace => {
            if let Some(edit) = session.color_edit.as_mut() {
                pop_grapheme(&mut edit.buffer);
            }
        }
        KeyCode::Char(c) => {
            if let Some(edit) = session.color_edit.as_mut() {
                if edit.buffer.len() < 16 {
                    edit.buffer.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn export(session: &mut Session) {
    match session.begin_export() {
        ExportStart::Started => {}
        ExportStart::Skipped(SkipReason::NoContent) => {
            session.set_status("Nothing to export - type something first", false);
        }
        ExportStart::Skipped(SkipReason::Unrenderable) => {
            let message = format!(
                "Cannot export: {}",
                session.render_error().unwrap_or("code not rendered")
            );
            session.set_status(&message, true);
        }
        ExportStart::Skipped(SkipReason::AlreadyExporting) => {}
    }
}

fn copy(session: &mut Session) {
    if session.copy_text() {
        session.set_status("Text copied to clipboard", false);
    } else {
        session.set_status("Nothing to copy - type something first", false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::export::{ClipboardSink, ExportError};
    use crate::settings::{Density, Settings};
    use crate::state::{AppState, InputMode};
    use crate::terminal_capabilities::TerminalCapabilities;
    use crossbeam_channel::unbounded;

    struct NullClipboard;

    impl ClipboardSink for NullClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ExportError> {
            Ok(())
        }
    }

    fn session() -> Session {
        let (tx, _rx) = unbounded();
        Session::new(
            AppState::default(),
            TerminalCapabilities::default(),
            Box::new(ManualClock::new(0)),
            Box::new(NullClipboard),
            tx,
        )
    }

    fn press(session: &mut Session, code: KeyCode) {
        handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), session).unwrap();
    }

    fn ctrl(session: &mut Session, c: char) {
        handle_event(
            Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)),
            session,
        )
        .unwrap();
    }

    #[test]
    fn test_typing_edits_text() {
        let mut s = session();
        ctrl(&mut s, 'w');
        for c in "hi!".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Backspace);
        assert_eq!(s.state.text, "hi");
    }

    #[test]
    fn test_enter_inserts_newline() {
        let mut s = session();
        s.set_text("line1");
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Char('x'));
        assert_eq!(s.state.text, "line1\nx");

        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Backspace);
        assert_eq!(s.state.text, "line1");
    }

    #[test]
    fn test_global_shortcuts() {
        let mut s = session();
        ctrl(&mut s, 'u');
        assert_eq!(s.state.mode, InputMode::Url);
        ctrl(&mut s, 't');
        assert!(s.state.dark_theme);
        ctrl(&mut s, 'r');
        assert_eq!(s.state.text, "");
        assert_eq!(s.state.mode, InputMode::Text);
        assert!(s.state.dark_theme);
        ctrl(&mut s, 'q');
        assert!(s.should_quit);
    }

    #[test]
    fn test_settings_panel_keys() {
        let mut s = session();
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.focus, FocusedWidget::Settings);

        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.state.settings.density, Density::Small);

        // Letters are shortcuts here, not text
        press(&mut s, KeyCode::Char('m'));
        assert_eq!(s.state.mode, InputMode::Url);
        assert_eq!(s.state.text, "https://github.com");
    }

    #[test]
    fn test_color_editing_flow() {
        let mut s = session();
        press(&mut s, KeyCode::Tab);
        press(&mut s, KeyCode::Enter);
        assert!(s.color_edit.is_some());

        for _ in 0..7 {
            press(&mut s, KeyCode::Backspace);
        }
        for c in "#112233".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.state.settings.foreground, "#112233");

        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Char('x'));
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.state.settings.foreground, "#112233");
        assert_ne!(s.state.settings, Settings::default());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut s = session();
        press(&mut s, KeyCode::F(1));
        assert!(s.show_help);
        press(&mut s, KeyCode::Char('z'));
        assert_eq!(s.state.text, "https://github.com");
        press(&mut s, KeyCode::Esc);
        assert!(!s.show_help);
    }

    #[test]
    fn test_paste_appends() {
        let mut s = session();
        ctrl(&mut s, 'w');
        handle_event(Event::Paste("pasted".to_string()), &mut s).unwrap();
        assert_eq!(s.state.text, "pasted");
    }
}
