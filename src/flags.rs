//! Transient UI flags
//!
//! View-only indicators with their own lifetimes. Every way in has exactly
//! one way out: a timeout for [`TimedFlag`], completion for [`ExportPhase`].

use std::time::Duration;

/// How long the "copied" confirmation stays up
pub const COPY_FLAG_HOLD: Duration = Duration::from_secs(2);

/// Minimum time the export indicator is shown before the file is written
pub const EXPORT_MIN_DURATION: Duration = Duration::from_millis(600);

/// A flag that switches itself off after a fixed hold time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedFlag {
    hold: Duration,
    expires_at: Option<Duration>,
}

impl TimedFlag {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            expires_at: None,
        }
    }

    /// Raise the flag; re-triggering restarts the window
    pub fn trigger(&mut self, now: Duration) {
        self.expires_at = Some(now + self.hold);
    }

    /// Drop the flag once its window has passed
    pub fn tick(&mut self, now: Duration) {
        if matches!(self.expires_at, Some(at) if now >= at) {
            self.expires_at = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }
}

/// Export progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    /// Showing feedback until `ready_at`, then the surface is read
    Pacing { ready_at: Duration },
    /// Job handed to the export worker
    Writing,
}

impl ExportPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, ExportPhase::Idle)
    }

    pub fn is_due(&self, now: Duration) -> bool {
        matches!(self, ExportPhase::Pacing { ready_at } if now >= *ready_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_flag_lifecycle() {
        let mut flag = TimedFlag::new(COPY_FLAG_HOLD);
        assert!(!flag.is_active());

        flag.trigger(Duration::ZERO);
        assert!(flag.is_active());

        flag.tick(Duration::from_millis(1999));
        assert!(flag.is_active());

        flag.tick(Duration::from_secs(2));
        assert!(!flag.is_active());
    }

    #[test]
    fn test_retrigger_restarts_window() {
        let mut flag = TimedFlag::new(COPY_FLAG_HOLD);
        flag.trigger(Duration::ZERO);
        flag.trigger(Duration::from_millis(1500));

        flag.tick(Duration::from_millis(2500));
        assert!(flag.is_active());

        flag.tick(Duration::from_millis(3500));
        assert!(!flag.is_active());
    }

    #[test]
    fn test_export_phase_due() {
        let phase = ExportPhase::Pacing {
            ready_at: EXPORT_MIN_DURATION,
        };
        assert!(phase.is_active());
        assert!(!phase.is_due(Duration::from_millis(599)));
        assert!(phase.is_due(Duration::from_millis(600)));
        assert!(!ExportPhase::Writing.is_due(Duration::from_secs(10)));
        assert!(!ExportPhase::Idle.is_active());
    }
}
