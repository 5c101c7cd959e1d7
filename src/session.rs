//! Session: application state plus everything derived from it
//!
//! Owns the durable [`AppState`], the current render, the transient flags
//! and the handles to the outside world. Every mutation goes through here
//! so the surface is re-derived after each relevant change.

use crossbeam_channel::Sender;

use crate::clock::Clock;
use crate::color_space::is_low_contrast;
use crate::export::{export_file_name, ClipboardSink};
use crate::flags::{ExportPhase, TimedFlag, COPY_FLAG_HOLD, EXPORT_MIN_DURATION};
use crate::render::{render, RasterSurface};
use crate::settings::{SettingKey, SettingValue, SettingsError};
use crate::state::{AppState, InputMode};
use crate::terminal_capabilities::TerminalCapabilities;
use crate::unicode_handler::pop_grapheme;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Which widget is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedWidget {
    #[default]
    Input,
    Settings,
}

impl FocusedWidget {
    pub fn next(&self) -> Self {
        match self {
            FocusedWidget::Input => FocusedWidget::Settings,
            FocusedWidget::Settings => FocusedWidget::Input,
        }
    }

    pub fn prev(&self) -> Self {
        self.next()
    }
}

/// Why an export or copy request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoContent,
    /// Text is present but the current settings cannot render it
    Unrenderable,
    AlreadyExporting,
}

/// Result of asking for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStart {
    Started,
    Skipped(SkipReason),
}

/// Colour being typed in the settings panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEdit {
    pub key: SettingKey,
    pub buffer: String,
}

pub struct Session {
    pub state: AppState,

    // Derived
    surface: Option<RasterSurface>,
    render_error: Option<String>,

    // Transient flags
    copied: TimedFlag,
    export: ExportPhase,

    // View
    pub focus: FocusedWidget,
    pub selected_setting: usize,
    pub color_edit: Option<ColorEdit>,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: String,
    pub status_is_error: bool,
    pub last_export: Option<std::path::PathBuf>,
    pub capabilities: TerminalCapabilities,

    // Outside world
    clock: Box<dyn Clock>,
    clipboard: Box<dyn ClipboardSink>,
    worker_tx: Sender<WorkerMessage>,
}

impl Session {
    pub fn new(
        state: AppState,
        capabilities: TerminalCapabilities,
        clock: Box<dyn Clock>,
        clipboard: Box<dyn ClipboardSink>,
        worker_tx: Sender<WorkerMessage>,
    ) -> Self {
        let mut session = Self {
            state,
            surface: None,
            render_error: None,
            copied: TimedFlag::new(COPY_FLAG_HOLD),
            export: ExportPhase::Idle,
            focus: FocusedWidget::default(),
            selected_setting: 0,
            color_edit: None,
            show_help: false,
            should_quit: false,
            status_message: "Ready - Press [F1] for help".to_string(),
            status_is_error: false,
            last_export: None,
            capabilities,
            clock,
            clipboard,
            worker_tx,
        };
        session.refresh_surface();
        session
    }

    /// Set status message
    pub fn set_status(&mut self, message: &str, is_error: bool) {
        self.status_message = message.to_string();
        self.status_is_error = is_error;
    }

    // ---- derived view -------------------------------------------------

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    pub fn render_error(&self) -> Option<&str> {
        self.render_error.as_deref()
    }

    pub fn is_copied(&self) -> bool {
        self.copied.is_active()
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_active()
    }

    pub fn export_phase(&self) -> ExportPhase {
        self.export
    }

    /// Export is offered only when there is something to save and no export running
    pub fn can_export(&self) -> bool {
        self.state.has_content() && self.surface.is_some() && !self.export.is_active()
    }

    pub fn can_copy(&self) -> bool {
        self.state.has_content()
    }

    pub fn low_contrast(&self) -> bool {
        is_low_contrast(&self.state.settings.foreground, &self.state.settings.background)
    }

    pub fn selected_key(&self) -> SettingKey {
        let keys = SettingKey::all();
        keys[self.selected_setting % keys.len()]
    }

    /// Re-run the render pipeline against the current state
    fn refresh_surface(&mut self) {
        match render(&self.state.text, &self.state.settings) {
            Ok(surface) => {
                self.surface = surface;
                if self.render_error.take().is_some() {
                    self.set_status("Ready", false);
                }
            }
            Err(e) => {
                log::debug!("render rejected: {}", e);
                self.surface = None;
                self.set_status(&format!("Cannot render: {}", e), true);
                self.render_error = Some(e.to_string());
            }
        }
    }

    // ---- state operations ---------------------------------------------

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.set_text(text);
        self.refresh_surface();
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = self.state.text.clone();
        text.push(c);
        self.set_text(text);
    }

    pub fn pop_grapheme(&mut self) {
        let mut text = self.state.text.clone();
        if pop_grapheme(&mut text).is_some() {
            self.set_text(text);
        }
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        if self.state.mode != mode {
            self.state.set_mode(mode);
            self.set_status(&format!("Input mode: {}", mode.name()), false);
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.mode.toggled());
    }

    pub fn set_setting(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        self.state.set_setting(key, value)?;
        self.refresh_surface();
        Ok(())
    }

    /// Boundary entry point for untyped `key`/`value` pairs
    pub fn set_setting_str(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let key: SettingKey = key.parse()?;
        let value = SettingValue::parse_for(key, value)?;
        self.set_setting(key, value)
    }

    pub fn toggle_theme(&mut self) {
        self.state.toggle_theme();
        let name = if self.state.dark_theme { "Dark" } else { "Light" };
        self.set_status(&format!("{} theme", name), false);
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.color_edit = None;
        self.refresh_surface();
        self.set_status("Reset to defaults", false);
    }

    // ---- settings panel navigation -------------------------------------

    pub fn next_setting(&mut self) {
        self.selected_setting = (self.selected_setting + 1) % SettingKey::all().len();
    }

    pub fn prev_setting(&mut self) {
        let count = SettingKey::all().len();
        self.selected_setting = (self.selected_setting + count - 1) % count;
    }

    /// Step the selected setting forwards or backwards
    pub fn cycle_selected(&mut self, forward: bool) {
        let settings = &self.state.settings;
        let value = match self.selected_key() {
            SettingKey::Density => {
                let d = settings.density;
                SettingValue::Density(if forward { d.next() } else { d.prev() })
            }
            SettingKey::Margin => SettingValue::Margin(!settings.margin),
            SettingKey::Foreground | SettingKey::Background => return,
        };
        let key = self.selected_key();
        if let Err(e) = self.set_setting(key, value) {
            self.set_status(&e.to_string(), true);
        }
    }

    pub fn start_color_edit(&mut self) {
        let key = self.selected_key();
        if !key.is_color() {
            return;
        }
        let buffer = match self.state.settings.value(key) {
            SettingValue::Color(c) => c,
            _ => String::new(),
        };
        self.color_edit = Some(ColorEdit { key, buffer });
        self.set_status("Editing colour: type hex and press Enter (Esc to cancel)", false);
    }

    pub fn cancel_color_edit(&mut self) {
        self.color_edit = None;
        self.set_status("Edit cancelled", false);
    }

    pub fn commit_color_edit(&mut self) {
        let Some(edit) = self.color_edit.take() else {
            return;
        };
        match self.set_setting(edit.key, SettingValue::Color(edit.buffer.trim().to_string())) {
            Ok(()) => match self.render_error.clone() {
                Some(err) => self.set_status(&err, true),
                None => self.set_status(&format!("{} set", edit.key.name()), false),
            },
            Err(e) => self.set_status(&e.to_string(), true),
        }
    }

    // ---- export / share -------------------------------------------------

    /// Copy the raw text. Clipboard failures are logged, never surfaced.
    pub fn copy_text(&mut self) -> bool {
        if !self.can_copy() {
            return false;
        }
        if let Err(e) = self.clipboard.set_text(&self.state.text) {
            log::warn!("clipboard write failed: {}", e);
        }
        self.copied.trigger(self.clock.now());
        true
    }

    /// Begin an export; the file is written once the pacing delay elapses
    pub fn begin_export(&mut self) -> ExportStart {
        if !self.state.has_content() {
            return ExportStart::Skipped(SkipReason::NoContent);
        }
        if self.surface.is_none() {
            return ExportStart::Skipped(SkipReason::Unrenderable);
        }
        if self.export.is_active() {
            return ExportStart::Skipped(SkipReason::AlreadyExporting);
        }
        self.export = ExportPhase::Pacing {
            ready_at: self.clock.now() + EXPORT_MIN_DURATION,
        };
        self.set_status("Processing export...", false);
        ExportStart::Started
    }

    /// Advance timers. Called once per frame.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.copied.tick(now);

        if self.export.is_due(now) {
            self.dispatch_export();
        }
    }

    /// Read the surface as it is now and hand it to the worker
    fn dispatch_export(&mut self) {
        self.refresh_surface();
        let Some(surface) = self.surface.clone() else {
            // Text went away while pacing: nothing to write
            self.export = ExportPhase::Idle;
            self.set_status("Nothing to export", false);
            return;
        };

        let file_name = export_file_name(self.clock.unix_millis());
        log::debug!("dispatching export {}", file_name);
        match self.worker_tx.send(WorkerMessage::Export { surface, file_name }) {
            Ok(()) => self.export = ExportPhase::Writing,
            Err(_) => {
                log::warn!("export worker is gone");
                self.export = ExportPhase::Idle;
                self.set_status("Export failed: worker unavailable", true);
            }
        }
    }

    /// Handle response from the export worker
    pub fn handle_worker_response(&mut self, response: WorkerResponse) {
        self.export = ExportPhase::Idle;

        match response {
            WorkerResponse::ExportComplete { path, write_time } => {
                self.set_status(
                    &format!("Saved {} ({}ms)", path.display(), write_time),
                    false,
                );
                self.last_export = Some(path);
            }
            WorkerResponse::Error(err) => {
                self.set_status(&format!("Export failed: {}", err), true);
            }
        }
    }
}
