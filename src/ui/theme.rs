//! Light and dark palettes

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

use crate::session::Session;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub bar_background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub ok: Color,
    pub error: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Reset,
            bar_background: Color::Gray,
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            highlight: Color::Magenta,
            ok: Color::Green,
            error: Color::Red,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            bar_background: Color::DarkGray,
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Cyan,
            highlight: Color::Yellow,
            ok: Color::LightGreen,
            error: Color::LightRed,
        }
    }

    pub fn for_session(session: &Session) -> Self {
        if session.state.dark_theme {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    pub fn bar(&self) -> Style {
        Style::default().bg(self.bar_background).fg(self.text)
    }

    /// Bordered panel, highlighted when focused
    pub fn panel(&self, title: &str, is_focused: bool) -> Block<'static> {
        let border_style = if is_focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        };

        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
    }
}
