//! Transient alert banner state.
//!
//! An alert is visible when set, hidden after `hide_after`, and cleared after
//! `clear_after` (both measured from when it was set). Setting a new alert
//! restarts the cycle. Time is passed in explicitly so the UI loop drives it.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::AlertConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct AlertStore {
    current: Option<Alert>,
    set_at: Option<Instant>,
    hide_after: Duration,
    clear_after: Duration,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new(&AlertConfig::default())
    }
}

impl AlertStore {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            current: None,
            set_at: None,
            hide_after: config.hide_after(),
            clear_after: config.clear_after(),
        }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Alert {
            message: message.into(),
            severity,
            visible: true,
        });
        self.set_at = Some(now);
    }

    /// Advances the lifecycle. Returns true when the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let (Some(set_at), Some(alert)) = (self.set_at, self.current.as_mut()) else {
            return false;
        };
        let elapsed = now.saturating_duration_since(set_at);

        if elapsed >= self.clear_after {
            self.current = None;
            self.set_at = None;
            return true;
        }
        if elapsed >= self.hide_after && alert.visible {
            alert.visible = false;
            return true;
        }
        false
    }

    /// The alert, including one that is hidden but not yet cleared.
    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    /// The alert only while it should be drawn.
    pub fn visible(&self) -> Option<&Alert> {
        self.current.as_ref().filter(|a| a.visible)
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_hides_then_clears() {
        let start = Instant::now();
        let mut store = AlertStore::default();
        store.show("Saved", Severity::Success, start);
        assert!(store.visible().is_some());

        assert!(!store.tick(start + Duration::from_millis(2999)));
        assert!(store.visible().is_some());

        assert!(store.tick(start + Duration::from_millis(3000)));
        assert!(store.visible().is_none());
        assert_eq!(store.current().map(|a| a.message.as_str()), Some("Saved"));

        assert!(store.tick(start + Duration::from_millis(3500)));
        assert!(store.current().is_none());
        assert!(!store.tick(start + Duration::from_millis(9000)));
    }

    #[test]
    fn test_new_alert_restarts_cycle() {
        let start = Instant::now();
        let mut store = AlertStore::default();
        store.show("first", Severity::Info, start);
        store.show("second", Severity::Error, start + Duration::from_millis(2500));

        store.tick(start + Duration::from_millis(3200));
        let alert = store.visible().unwrap();
        assert_eq!(alert.message, "second");
        assert_eq!(alert.severity, Severity::Error);
    }

    #[test]
    fn test_late_tick_clears_directly() {
        let start = Instant::now();
        let mut store = AlertStore::default();
        store.show("x", Severity::Warning, start);
        assert!(store.tick(start + Duration::from_secs(10)));
        assert!(!store.is_active());
    }
}
