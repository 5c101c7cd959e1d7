//! Preview area rendering
//!
//! Draws the module grid of the current surface. With half blocks each
//! cell carries two module rows: `▀` painted foreground on top and
//! background below.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Theme;
use crate::color_space::to_terminal_color;
use crate::render::RasterSurface;
use crate::session::Session;
use crate::terminal_capabilities::{ColorSupport, TerminalCapabilities};

/// Render the preview area
pub fn render_preview(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let title = match session.surface() {
        Some(surface) => format!(
            " Preview {}x{} ",
            surface.size(),
            surface.size()
        ),
        None => " Preview ".to_string(),
    };
    let block = theme.panel(&title, false);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match session.surface() {
        Some(surface) => render_surface(frame, inner, surface, session, theme),
        None => render_placeholder(frame, inner, session, theme),
    }
}

/// Half blocks encode modules as colours, so they need a UTF-8 terminal that paints colour
fn uses_half_blocks(capabilities: &TerminalCapabilities) -> bool {
    capabilities.half_blocks && capabilities.color_support != ColorSupport::NoColor
}

/// Terminal cells needed to draw `surface`
fn required_cells(surface: &RasterSurface, half_blocks: bool) -> (u16, u16) {
    let n = surface.module_count() as u16;
    if half_blocks {
        (n, n.div_ceil(2))
    } else {
        (n * 2, n)
    }
}

fn render_surface(
    frame: &mut Frame,
    area: Rect,
    surface: &RasterSurface,
    session: &Session,
    theme: &Theme,
) {
    let half_blocks = uses_half_blocks(&session.capabilities);
    let (width, height) = required_cells(surface, half_blocks);

    if width > area.width || height > area.height {
        let message = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Code ready, terminal too small to preview",
                Style::default().fg(theme.highlight),
            )),
            Line::from(Span::styled(
                format!("Needs {}x{} cells", width, height),
                Style::default().fg(theme.muted),
            )),
            Line::from(Span::styled(
                "Export with [S] still works",
                Style::default().fg(theme.ok),
            )),
        ];
        frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), area);
        return;
    }

    let support = session.capabilities.color_support;
    let fg = to_terminal_color(surface.foreground(), support);
    let bg = to_terminal_color(surface.background(), support);

    let lines = if half_blocks {
        half_block_lines(surface, fg, bg)
    } else {
        ascii_lines(surface)
    };

    let target = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Paragraph::new(lines), target);
}

fn half_block_lines(surface: &RasterSurface, fg: Color, bg: Color) -> Vec<Line<'static>> {
    let n = surface.module_count();
    let paint = |dark: bool| if dark { fg } else { bg };

    (0..n)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span> = (0..n)
                .map(|x| {
                    let top = paint(surface.is_dark(x, y));
                    // Past the last row reads as light
                    let bottom = paint(surface.is_dark(x, y + 1));
                    Span::styled("▀", Style::default().fg(top).bg(bottom))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn ascii_lines(surface: &RasterSurface) -> Vec<Line<'static>> {
    let n = surface.module_count();
    (0..n)
        .map(|y| {
            let row: String = (0..n)
                .map(|x| if surface.is_dark(x, y) { "##" } else { "  " })
                .collect();
            Line::raw(row)
        })
        .collect()
}

/// Render placeholder when no content
fn render_placeholder(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let message = match session.render_error() {
        Some(err) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Cannot render this code",
                Style::default().fg(theme.error),
            )),
            Line::from(""),
            Line::from(Span::styled(err.to_string(), Style::default().fg(theme.muted))),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing to encode",
                Style::default().fg(theme.muted),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Type {} to generate a code", article(session)),
                Style::default().fg(theme.ok),
            )),
        ],
    };

    let widget = Paragraph::new(message)
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center);

    frame.render_widget(widget, area);
}

fn article(session: &Session) -> &'static str {
    match session.state.mode {
        crate::state::InputMode::Text => "some text",
        crate::state::InputMode::Url => "a URL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::settings::Settings;

    #[test]
    fn test_required_cells() {
        let surface = render("hi", &Settings::default()).unwrap().unwrap();
        let n = surface.module_count() as u16;
        assert_eq!(required_cells(&surface, true), (n, (n + 1) / 2));
        assert_eq!(required_cells(&surface, false), (n * 2, n));
    }

    #[test]
    fn test_no_color_falls_back_to_ascii() {
        let mut capabilities = TerminalCapabilities::default();
        assert!(uses_half_blocks(&capabilities));

        capabilities.color_support = ColorSupport::NoColor;
        assert!(!uses_half_blocks(&capabilities));

        capabilities.color_support = ColorSupport::Color16;
        capabilities.half_blocks = false;
        assert!(!uses_half_blocks(&capabilities));
    }

    #[test]
    fn test_half_block_rows() {
        let surface = render("hi", &Settings::default()).unwrap().unwrap();
        let lines = half_block_lines(&surface, Color::Black, Color::White);
        assert_eq!(lines.len(), surface.module_count().div_ceil(2));
        assert!(lines.iter().all(|l| l.spans.len() == surface.module_count()));
    }

    #[test]
    fn test_ascii_rows_mark_dark_modules() {
        let settings = Settings {
            margin: false,
            ..Settings::default()
        };
        let surface = render("hi", &settings).unwrap().unwrap();
        let lines = ascii_lines(&surface);
        // Finder pattern occupies the top-left corner
        assert!(lines[0].spans[0].content.starts_with("##"));
    }
}
