//! Terminal capability detection
//!
//! Decides how faithfully the preview can paint the configured colours and
//! whether half-block glyphs are safe to draw.

use std::env;

/// Level of color support in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSupport {
    NoColor,
    Color16,
    Color256,
    #[default]
    TrueColor,
}

/// Terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_support: ColorSupport,
    /// Half blocks (`▀`) need a UTF-8 locale; otherwise the preview uses `##`
    pub half_blocks: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            color_support: ColorSupport::TrueColor,
            half_blocks: true,
        }
    }
}

/// Detect terminal capabilities from the process environment
pub fn detect_capabilities() -> TerminalCapabilities {
    let lookup = |name: &str| env::var(name).ok();
    TerminalCapabilities {
        color_support: detect_color_support(lookup),
        half_blocks: detect_utf8(lookup),
    }
}

/// Detect the level of color support from environment variables
pub fn detect_color_support<F>(lookup: F) -> ColorSupport
where
    F: Fn(&str) -> Option<String>,
{
    // NO_COLOR is the de-facto opt-out
    if lookup("NO_COLOR").is_some() {
        return ColorSupport::NoColor;
    }

    if let Some(colorterm) = lookup("COLORTERM") {
        let colorterm = colorterm.to_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return ColorSupport::TrueColor;
        }
    }

    if lookup("WT_SESSION").is_some() {
        return ColorSupport::TrueColor;
    }

    if let Some(term) = lookup("TERM") {
        let term = term.to_lowercase();

        if term.contains("kitty") || term.contains("alacritty") || term.contains("256color") {
            return ColorSupport::Color256;
        }
        if term.contains("screen") || term.contains("tmux") {
            return ColorSupport::Color256;
        }
        if term.contains("xterm") || term.contains("linux") || term.contains("console") {
            return ColorSupport::Color16;
        }
        if term == "dumb" {
            return ColorSupport::NoColor;
        }
    }

    ColorSupport::Color256
}

/// Whether the locale advertises UTF-8
pub fn detect_utf8<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("WT_SESSION").is_some() {
        return true;
    }
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|name| lookup(name))
        .any(|v| v.to_uppercase().contains("UTF"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_no_color_wins() {
        let lookup = env_of(&[("NO_COLOR", "1"), ("COLORTERM", "truecolor")]);
        assert_eq!(detect_color_support(lookup), ColorSupport::NoColor);
    }

    #[test]
    fn test_truecolor_detection() {
        let lookup = env_of(&[("COLORTERM", "truecolor"), ("TERM", "xterm")]);
        assert_eq!(detect_color_support(lookup), ColorSupport::TrueColor);
    }

    #[test]
    fn test_term_fallbacks() {
        assert_eq!(
            detect_color_support(env_of(&[("TERM", "xterm-256color")])),
            ColorSupport::Color256
        );
        assert_eq!(
            detect_color_support(env_of(&[("TERM", "linux")])),
            ColorSupport::Color16
        );
        assert_eq!(detect_color_support(env_of(&[])), ColorSupport::Color256);
    }

    #[test]
    fn test_utf8_detection() {
        assert!(detect_utf8(env_of(&[("LANG", "en_US.UTF-8")])));
        assert!(!detect_utf8(env_of(&[("LANG", "C")])));
    }
}
