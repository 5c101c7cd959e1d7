//! UI module
//!
//! Contains all UI rendering components using Ratatui.

mod help;
mod preview;
mod theme;
mod widgets;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::session::{FocusedWidget, Session};
use crate::unicode_handler::{display_width, grapheme_count, tail_to_width};

/// Main render function - draws the entire UI
pub fn render(frame: &mut Frame, session: &Session) {
    let size = frame.area();
    let theme = Theme::for_session(session);

    // Check minimum size
    if size.width < 40 || size.height < 15 {
        render_size_warning(frame, size, &theme);
        return;
    }

    frame.render_widget(Block::default().style(theme.base()), size);

    // Main layout: title bar, content, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_title_bar(frame, main_chunks[0], session, &theme);
    render_main_content(frame, main_chunks[1], session, &theme);
    render_status_bar(frame, main_chunks[2], session, &theme);

    if session.show_help {
        help::render_help_overlay(frame, size, &theme);
    }
}

/// Render warning when terminal is too small
fn render_size_warning(frame: &mut Frame, area: Rect, theme: &Theme) {
    let warning = Paragraph::new("Terminal too small!\nMinimum: 40x15")
        .style(Style::default().fg(theme.error))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(warning, area);
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let mode = session.state.mode.name();
    let theme_name = if session.state.dark_theme { "Dark" } else { "Light" };

    let title = Line::from(vec![
        Span::styled(
            " MR",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("->", Style::default().fg(theme.highlight)),
        Span::styled(
            "QR ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(mode, Style::default().fg(theme.highlight)),
        Span::raw(" │ "),
        Span::styled(theme_name, Style::default().fg(theme.muted)),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(38)
                .saturating_sub(mode.len() + theme_name.len()),
        )),
        Span::styled("[F1]", Style::default().fg(theme.ok)),
        Span::raw(" Help  "),
        Span::styled("[^Q]", Style::default().fg(theme.error)),
        Span::raw(" Quit "),
    ]);

    let title_widget = Paragraph::new(title).style(theme.bar());
    frame.render_widget(title_widget, area);
}

/// Render the main content area
fn render_main_content(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    // Responsive layout: side-by-side if wide enough, stacked if narrow
    let direction = if area.width >= 80 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Length(38), Constraint::Min(20)])
        .split(area);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Input
            Constraint::Min(8),    // Settings + actions
        ])
        .split(chunks[0]);

    render_input_box(frame, left_chunks[0], session, theme);
    render_control_panel(frame, left_chunks[1], session, theme);
    preview::render_preview(frame, chunks[1], session, theme);
}

/// Render the text input box
fn render_input_box(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let is_focused = session.focus == FocusedWidget::Input;
    let mut block = theme.panel(&format!(" {} ", session.state.mode.name()), is_focused);
    if let Some(ref err) = session.state.last_error {
        block = block.title_bottom(Span::styled(
            format!(" {} ", err),
            Style::default().fg(theme.error),
        ));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(1) as usize;
    let lines = if session.state.text.is_empty() {
        vec![Line::from(vec![
            Span::styled(
                session.state.mode.placeholder(),
                Style::default().fg(theme.muted),
            ),
            cursor_span(is_focused, theme),
        ])]
    } else {
        input_lines(&session.state.text, width, inner.height as usize, is_focused, theme)
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

/// The last `rows` lines of `text`, each cut to its end so the cursor stays visible
fn input_lines(
    text: &str,
    width: usize,
    rows: usize,
    is_focused: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let all: Vec<&str> = text.split('\n').collect();
    let skip = all.len().saturating_sub(rows.max(1));
    let last = all.len() - 1;

    all.iter()
        .enumerate()
        .skip(skip)
        .map(|(i, line)| {
            let visible = tail_to_width(line, width);
            let hidden = display_width(visible) < display_width(line);
            let mut spans = vec![
                Span::styled(if hidden { "…" } else { "" }, Style::default().fg(theme.muted)),
                Span::styled(visible.to_string(), Style::default().fg(theme.text)),
            ];
            if i == last {
                spans.push(cursor_span(is_focused, theme));
            }
            Line::from(spans)
        })
        .collect()
}

fn cursor_span(is_focused: bool, theme: &Theme) -> Span<'static> {
    if is_focused {
        Span::styled("▌", Style::default().fg(theme.accent))
    } else {
        Span::raw("")
    }
}

/// Render the settings and actions panel
fn render_control_panel(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let is_focused = session.focus == FocusedWidget::Settings;
    let block = theme.panel(" Settings ", is_focused);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    widgets::render_settings_controls(frame, inner, session, theme, is_focused);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let status_color = if session.status_is_error {
        theme.error
    } else {
        theme.text
    };

    let density = session.state.settings.density;
    let info = format!(
        "{}px │ EC: H │ {} chars",
        density.pixels(),
        grapheme_count(&session.state.text)
    );

    let spacing = (area.width as usize)
        .saturating_sub(display_width(&session.status_message))
        .saturating_sub(info.len())
        .saturating_sub(2);

    let status = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            session.status_message.clone(),
            Style::default().fg(status_color),
        ),
        Span::raw(" ".repeat(spacing)),
        Span::styled(info, Style::default().fg(theme.muted)),
        Span::raw(" "),
    ]);

    frame.render_widget(Paragraph::new(status).style(theme.bar()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::export::{ClipboardSink, ExportError};
    use crate::state::AppState;
    use crate::terminal_capabilities::{ColorSupport, TerminalCapabilities};
    use crossbeam_channel::unbounded;
    use ratatui::{backend::TestBackend, Terminal};

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

    fn screen_text(session: &Session, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, session)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_main_screen() {
        let s = session();
        let screen = screen_text(&s, 120, 40);
        assert!(screen.contains("MR->QR"));
        assert!(screen.contains("github.com"));
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Preview"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut s = session();
        s.set_text("");
        let screen = screen_text(&s, 120, 40);
        assert!(screen.contains("Nothing to encode"));
    }

    #[test]
    fn test_multiline_input_shows_last_lines() {
        let theme = Theme::light();
        let lines = input_lines("one\ntwo\nthree\nfour", 20, 3, true, &theme);
        let rows: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.to_string()).collect())
            .collect();
        assert_eq!(rows, ["two", "three", "four▌"]);

        let mut s = session();
        s.set_text("first\nsecond");
        let screen = screen_text(&s, 120, 40);
        assert!(screen.lines().any(|row| row.contains("first")));
        assert!(screen.lines().any(|row| row.contains("second") && !row.contains("first")));
    }

    #[test]
    fn test_no_color_preview_uses_ascii() {
        let (tx, _rx) = unbounded();
        let capabilities = TerminalCapabilities {
            color_support: ColorSupport::NoColor,
            half_blocks: true,
        };
        let s = Session::new(
            AppState::default(),
            capabilities,
            Box::new(ManualClock::new(0)),
            Box::new(NullClipboard),
            tx,
        );
        let screen = screen_text(&s, 160, 60);
        assert!(screen.contains("##"));
        assert!(!screen.contains('▀'));
    }

    #[test]
    fn test_input_error_shown() {
        let mut s = session();
        s.state.last_error = Some("bad input".to_string());
        let screen = screen_text(&s, 120, 40);
        assert!(screen.contains("bad input"));
    }

    #[test]
    fn test_small_terminal_warning() {
        let s = session();
        let screen = screen_text(&s, 30, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_help_overlay() {
        let mut s = session();
        s.show_help = true;
        let screen = screen_text(&s, 120, 40);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
