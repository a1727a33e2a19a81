//! Debounced "milestone unlocked" toast.
//!
//! At most one toast is pending. Raising a new one replaces it and restarts
//! the dismiss timer. Time is passed in, so callers decide what "now" is.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TOAST_MS: i64 = 3600;
pub const MAX_TOAST_MS: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub dismiss_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    delay: Duration,
    pending: Option<Toast>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_TOAST_MS))
    }
}

impl Notifier {
    /// Delay is clamped to 0..=MAX_TOAST_MS.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.clamp(Duration::zero(), Duration::milliseconds(MAX_TOAST_MS)),
            pending: None,
        }
    }

    pub fn from_millis(ms: i64) -> Self {
        Self::new(Duration::milliseconds(ms.clamp(0, MAX_TOAST_MS)))
    }

    /// Show `message`, cancelling any pending dismissal.
    pub fn raise(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> &Toast {
        self.pending.insert(Toast {
            message: message.into(),
            dismiss_at: now + self.delay,
        })
    }

    /// The toast still on screen at `now`; expired toasts are dropped.
    pub fn visible(&mut self, now: DateTime<Utc>) -> Option<&str> {
        if self.pending.as_ref().is_some_and(|t| now >= t.dismiss_at) {
            self.pending = None;
        }
        self.pending.as_ref().map(|t| t.message.as_str())
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}
