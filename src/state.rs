//! Application state management
//!
//! Single source of truth for the content being encoded. Transient
//! indicators (copy confirmation, export progress) live in the session,
//! not here.

use crate::settings::{SettingKey, SettingValue, Settings, SettingsError};

/// Text shown on first launch
pub const SAMPLE_TEXT: &str = "https://github.com";

/// Input framing. Only affects labels and placeholders, never encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Url,
}

impl InputMode {
    pub fn name(&self) -> &'static str {
        match self {
            InputMode::Text => "Text",
            InputMode::Url => "URL",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            InputMode::Text => "Type anything to encode...",
            InputMode::Url => "https://example.com",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            InputMode::Text => InputMode::Url,
            InputMode::Url => InputMode::Text,
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(InputMode::Text),
            "url" => Ok(InputMode::Url),
            other => Err(format!("unknown input mode '{}'", other)),
        }
    }
}

/// Durable application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: InputMode,
    pub text: String,
    pub settings: Settings,
    pub dark_theme: bool,
    /// Reserved for input validation; nothing sets it yet.
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AppState {
    pub fn new(dark_theme: bool) -> Self {
        Self {
            mode: InputMode::default(),
            text: SAMPLE_TEXT.to_string(),
            settings: Settings::default(),
            dark_theme,
            last_error: None,
        }
    }

    /// Replace the text to encode. No normalisation is applied.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.last_error = None;
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_setting(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        self.settings.apply(key, value)
    }

    pub fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
    }

    /// Clear content back to defaults. The theme is a user preference and survives.
    pub fn reset(&mut self) {
        *self = Self {
            mode: InputMode::Text,
            text: String::new(),
            settings: Settings::default(),
            dark_theme: self.dark_theme,
            last_error: None,
        };
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Density;

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.mode, InputMode::Text);
        assert_eq!(state.text, SAMPLE_TEXT);
        assert_eq!(state.settings, Settings::default());
        assert!(!state.dark_theme);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_set_text_clears_error() {
        let mut state = AppState::default();
        state.last_error = Some("bad".to_string());
        state.set_text("hello");
        assert_eq!(state.text, "hello");
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_set_mode_keeps_content() {
        let mut state = AppState::default();
        let before = state.clone();
        state.set_mode(InputMode::Url);
        assert_eq!(state.mode, InputMode::Url);
        assert_eq!(state.text, before.text);
        assert_eq!(state.settings, before.settings);
    }

    #[test]
    fn test_reset_preserves_theme() {
        let mut state = AppState::new(true);
        state.set_mode(InputMode::Url);
        state
            .set_setting(SettingKey::Density, SettingValue::Density(Density::Large))
            .unwrap();
        state.reset();

        assert_eq!(state.text, "");
        assert_eq!(state.mode, InputMode::Text);
        assert_eq!(state.settings, Settings::default());
        assert!(state.dark_theme);
    }

    #[test]
    fn test_input_mode_parse() {
        assert_eq!("URL".parse::<InputMode>().unwrap(), InputMode::Url);
        assert!("qr".parse::<InputMode>().is_err());
    }
}
