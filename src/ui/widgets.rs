//! Settings and action widgets

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Theme;
use crate::color_space::{parse_color, to_terminal_color};
use crate::session::Session;
use crate::settings::SettingKey;
use crate::unicode_handler::ellipsize;

/// Render the settings list followed by the action buttons
pub fn render_settings_controls(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    theme: &Theme,
    is_focused: bool,
) {
    let selected = session.selected_key();
    let mut lines = Vec::new();

    for key in SettingKey::all() {
        let is_selected = *key == selected && is_focused;
        let editing = session.color_edit.as_ref().filter(|e| e.key == *key);

        let (value, hint) = match editing {
            Some(edit) => (format!("{}▌", edit.buffer), Some("[Enter/Esc]")),
            None => {
                let hint = if key.is_color() { "[Enter]" } else { "[←/→]" };
                (ellipsize(&session.state.settings.value(*key).display(), 18), Some(hint))
            }
        };

        let mut line = create_setting_line(key.name(), &value, is_selected, hint, theme);
        if key.is_color() {
            line.spans.push(color_swatch(session, *key));
        }
        lines.push(line);
    }

    if session.low_contrast() {
        lines.push(Line::from(Span::styled(
            "  ! Low contrast: may not scan",
            Style::default().fg(theme.highlight),
        )));
    }

    // Action buttons
    lines.push(Line::from(""));
    let export_label = if session.is_exporting() {
        "Processing Export..."
    } else {
        "Export PNG"
    };
    lines.push(create_action_line("[S]", export_label, session.can_export(), theme));

    if session.is_copied() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("✓ Text Copied!", Style::default().fg(theme.ok)),
        ]));
    } else {
        lines.push(create_action_line("[C]", "Copy Text", session.can_copy(), theme));
    }
    lines.push(create_action_line("[M]", "Toggle Text/URL", true, theme));
    lines.push(create_action_line("[T]", "Toggle Theme", true, theme));
    lines.push(create_action_line("[R]", "Reset", true, theme));

    if let Some(ref path) = session.last_export {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  Last: {}", ellipsize(&path.display().to_string(), 28)),
            Style::default().fg(theme.muted),
        )));
    }

    if is_focused {
        lines.push(Line::from(Span::styled(
            "Tip: Tab returns to the input box",
            Style::default().fg(theme.muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Two cells painted with the colour, or `??` if it does not parse
fn color_swatch(session: &Session, key: SettingKey) -> Span<'static> {
    let raw = match key {
        SettingKey::Foreground => &session.state.settings.foreground,
        _ => &session.state.settings.background,
    };
    match parse_color(raw) {
        Some(rgb) => Span::styled(
            " ██",
            Style::default().fg(to_terminal_color(rgb, session.capabilities.color_support)),
        ),
        None => Span::raw(" ??"),
    }
}

/// Create a setting line with label, value, and optional hint
fn create_setting_line(
    label: &str,
    value: &str,
    is_selected: bool,
    hint: Option<&str>,
    theme: &Theme,
) -> Line<'static> {
    let indicator = if is_selected { "▸" } else { " " };

    let label_style = if is_selected {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let value_style = if is_selected {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.muted)
    };

    let mut spans = vec![
        Span::styled(format!("{} ", indicator), Style::default().fg(theme.accent)),
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(value.to_string(), value_style),
    ];

    if let (true, Some(hint_text)) = (is_selected, hint) {
        spans.push(Span::styled(
            format!(" {}", hint_text),
            Style::default().fg(theme.muted),
        ));
    }

    Line::from(spans)
}

/// Create an action line (button-like), dimmed when unavailable
fn create_action_line(key: &str, label: &str, enabled: bool, theme: &Theme) -> Line<'static> {
    let (key_style, label_style) = if enabled {
        (Style::default().fg(theme.ok), Style::default().fg(theme.text))
    } else {
        let dim = Style::default().fg(theme.muted).add_modifier(Modifier::DIM);
        (dim, dim)
    };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(key.to_string(), key_style),
        Span::styled(format!(" {}", label), label_style),
    ])
}
