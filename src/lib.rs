//! MR->QR - Terminal QR Code Studio
//!
//! A TUI application for turning text and URLs into QR codes, with PNG
//! export and clipboard copy.

pub mod clock;
pub mod color_space;
pub mod config;
pub mod export;
pub mod flags;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
pub mod settings;
pub mod state;
pub mod terminal_capabilities;
pub mod ui;
pub mod unicode_handler;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use session::Session;
pub use settings::{Density, SettingKey, SettingValue, Settings};
pub use state::{AppState, InputMode};
