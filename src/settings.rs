//! Visual output settings
//!
//! Fixed-shape record of the knobs that feed the render pipeline, plus the
//! boundary parsing used by the CLI and the settings editor.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default pattern colour
pub const DEFAULT_FOREGROUND: &str = "#0f172a";
/// Default background colour
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Output raster size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Density {
    Small,
    #[default]
    Medium,
    Large,
}

impl Density {
    /// Width and height of the rendered image
    pub fn pixels(&self) -> u32 {
        match self {
            Density::Small => 128,
            Density::Medium => 256,
            Density::Large => 512,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Density::Small => "Small",
            Density::Medium => "Medium",
            Density::Large => "Large",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Density::Small => Density::Medium,
            Density::Medium => Density::Large,
            Density::Large => Density::Small,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Density::Small => Density::Large,
            Density::Medium => Density::Small,
            Density::Large => Density::Medium,
        }
    }

    pub fn all() -> &'static [Density] {
        &ALL_DENSITIES[..]
    }
}

static ALL_DENSITIES: [Density; 3] = [Density::Small, Density::Medium, Density::Large];

impl FromStr for Density {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" | "128" => Ok(Density::Small),
            "medium" | "256" => Ok(Density::Medium),
            "large" | "512" => Ok(Density::Large),
            _ => Err(SettingsError::InvalidValue {
                key: SettingKey::Density,
                value: s.to_string(),
            }),
        }
    }
}

/// The recognised setting names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Foreground,
    Background,
    Density,
    Margin,
}

impl SettingKey {
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Foreground => "Pattern",
            SettingKey::Background => "Background",
            SettingKey::Density => "Density",
            SettingKey::Margin => "Margin",
        }
    }

    /// Editor order
    pub fn all() -> &'static [SettingKey] {
        &ALL_SETTING_KEYS[..]
    }

    pub fn is_color(&self) -> bool {
        matches!(self, SettingKey::Foreground | SettingKey::Background)
    }
}

static ALL_SETTING_KEYS: [SettingKey; 4] = [
    SettingKey::Foreground,
    SettingKey::Background,
    SettingKey::Density,
    SettingKey::Margin,
];

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foreground" | "fg" => Ok(SettingKey::Foreground),
            "background" | "bg" => Ok(SettingKey::Background),
            "density" | "size" => Ok(SettingKey::Density),
            "margin" | "include-margin" => Ok(SettingKey::Margin),
            _ => Err(SettingsError::UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            SettingKey::Foreground => "foreground",
            SettingKey::Background => "background",
            SettingKey::Density => "density",
            SettingKey::Margin => "margin",
        };
        f.write_str(key)
    }
}

/// A value for a single setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Color(String),
    Density(Density),
    Margin(bool),
}

impl SettingValue {
    /// Parse a raw string into the value kind `key` expects.
    ///
    /// Colour strings are accepted verbatim; the render pipeline decides
    /// whether they are usable.
    pub fn parse_for(key: SettingKey, raw: &str) -> Result<Self, SettingsError> {
        match key {
            SettingKey::Foreground | SettingKey::Background => {
                Ok(SettingValue::Color(raw.trim().to_string()))
            }
            SettingKey::Density => raw.parse().map(SettingValue::Density),
            SettingKey::Margin => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(SettingValue::Margin(true)),
                "false" | "off" | "no" | "0" => Ok(SettingValue::Margin(false)),
                _ => Err(SettingsError::InvalidValue {
                    key,
                    value: raw.to_string(),
                }),
            },
        }
    }

    /// Parse a `key=value` pair as given on the command line
    pub fn parse_assignment(assignment: &str) -> Result<(SettingKey, Self), SettingsError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| SettingsError::MalformedAssignment(assignment.to_string()))?;
        let key: SettingKey = key.parse()?;
        Ok((key, Self::parse_for(key, value)?))
    }

    pub fn display(&self) -> String {
        match self {
            SettingValue::Color(c) => c.clone(),
            SettingValue::Density(d) => format!("{} ({}px)", d.name(), d.pixels()),
            SettingValue::Margin(m) => if *m { "On" } else { "Off" }.to_string(),
        }
    }
}

/// Errors raised at the settings boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown setting '{0}' (expected foreground, background, density or margin)")]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: SettingKey, value: String },
    #[error("{key} does not accept that kind of value")]
    ValueMismatch { key: SettingKey },
    #[error("expected key=value, got '{0}'")]
    MalformedAssignment(String),
}

/// Visual configuration of the rendered code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub foreground: String,
    pub background: String,
    pub density: Density,
    pub margin: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            density: Density::default(),
            margin: true,
        }
    }
}

impl Settings {
    /// Replace one field. A value of the wrong kind leaves everything untouched.
    pub fn apply(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        match (key, value) {
            (SettingKey::Foreground, SettingValue::Color(c)) => self.foreground = c,
            (SettingKey::Background, SettingValue::Color(c)) => self.background = c,
            (SettingKey::Density, SettingValue::Density(d)) => self.density = d,
            (SettingKey::Margin, SettingValue::Margin(m)) => self.margin = m,
            (key, _) => return Err(SettingsError::ValueMismatch { key }),
        }
        Ok(())
    }

    pub fn value(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Foreground => SettingValue::Color(self.foreground.clone()),
            SettingKey::Background => SettingValue::Color(self.background.clone()),
            SettingKey::Density => SettingValue::Density(self.density),
            SettingKey::Margin => SettingValue::Margin(self.margin),
        }
    }
}
