//! Help overlay rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::Theme;

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_width = (area.width as f32 * 0.7).min(64.0) as u16;
    let overlay_height = (area.height as f32 * 0.8).min(28.0) as u16;

    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(theme.base())
        .title(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let widget = Paragraph::new(create_help_text(theme)).style(Style::default().fg(theme.text));
    frame.render_widget(widget, inner);
}

/// Create help text content
fn create_help_text(theme: &Theme) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(theme.ok);
    let desc_style = Style::default().fg(theme.text);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    vec![
        Line::from(Span::styled("Anywhere", section_style)),
        entry("Ctrl+S", "Export PNG"),
        entry("Ctrl+Y", "Copy text to clipboard"),
        entry("Ctrl+U", "Toggle Text / URL input"),
        entry("Ctrl+T", "Toggle light / dark theme"),
        entry("Ctrl+R", "Reset text and settings"),
        entry("Tab", "Switch input / settings"),
        entry("F1", "Toggle this help"),
        entry("Ctrl+Q", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Input", section_style)),
        entry("Backspace", "Delete last character"),
        entry("Enter", "New line"),
        entry("Ctrl+W", "Clear all text"),
        Line::from(""),
        Line::from(Span::styled("Settings", section_style)),
        entry("↑ ↓", "Select setting"),
        entry("← →", "Cycle density / toggle margin"),
        entry("Enter", "Edit colour (hex)"),
        entry("S C", "Export / copy"),
        entry("M T R", "Mode / theme / reset"),
        Line::from(""),
        Line::from(Span::styled(
            "       [Press F1 or Esc to close]",
            Style::default().fg(theme.muted),
        )),
    ]
}

/// Create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal_padding = area.width.saturating_sub(width) / 2;
    let vertical_padding = area.height.saturating_sub(height) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(horizontal_padding),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
