//! Toast notifications and their lifecycle
//!
//! A notification is inserted in [`Visibility::Entering`], slides in after a
//! short delay, and closes either when its duration elapses or when the user
//! dismisses it. Closing slides it out and removes it once the transition ends.

use super::timer::DeadlineTimer;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Icon glyph, with an ASCII fallback for limited terminals
    pub fn icon(self, ascii: bool) -> char {
        match (self, ascii) {
            (Self::Success, false) => '\u{2713}', // ✓
            (Self::Success, true) => '+',
            (Self::Error, false) => '\u{2717}', // ✗
            (Self::Error, true) => 'x',
            (Self::Warning, _) => '!',
            (Self::Info, _) => 'i',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Visibility phase of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Inserted, waiting to slide in
    Entering,
    Shown,
    /// Sliding out
    Leaving,
    Removed,
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// Zero means the notification stays until dismissed
    pub duration: Duration,
    pub visibility: Visibility,
    /// When the current slide transition started
    transition_started: Instant,
    show_timer: DeadlineTimer,
    dismiss_timer: DeadlineTimer,
    removal_timer: DeadlineTimer,
}

impl Notification {
    /// Delay before a new notification slides in (100ms)
    pub const SHOW_DELAY: Duration = Duration::from_millis(100);
    /// Length of the slide in/out transition (300ms)
    pub const TRANSITION: Duration = Duration::from_millis(300);
    /// Default time on screen before auto-dismiss (5s)
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

    pub fn new(message: &str, severity: Severity, duration: Duration, now: Instant) -> Self {
        let dismiss_timer = if duration.is_zero() {
            DeadlineTimer::default()
        } else {
            DeadlineTimer::armed(now, duration)
        };
        Self {
            id: NotificationId::new(),
            message: message.to_string(),
            severity,
            duration,
            visibility: Visibility::Entering,
            transition_started: now,
            show_timer: DeadlineTimer::armed(now, Self::SHOW_DELAY),
            dismiss_timer,
            removal_timer: DeadlineTimer::default(),
        }
    }

    /// Start sliding out. Returns false if already closing or removed.
    pub fn close(&mut self, now: Instant) -> bool {
        if matches!(self.visibility, Visibility::Leaving | Visibility::Removed) {
            return false;
        }
        self.show_timer.cancel();
        self.dismiss_timer.cancel();
        self.visibility = Visibility::Leaving;
        self.transition_started = now;
        self.removal_timer.reschedule(now, Self::TRANSITION);
        true
    }

    /// Advance timers
    pub fn tick(&mut self, now: Instant) {
        if self.show_timer.fire_if_due(now) && self.visibility == Visibility::Entering {
            self.visibility = Visibility::Shown;
            self.transition_started = now;
        }
        if self.dismiss_timer.fire_if_due(now) {
            self.close(now);
        }
        if self.removal_timer.fire_if_due(now) && self.visibility == Visibility::Leaving {
            self.visibility = Visibility::Removed;
        }
    }

    /// Cancel every pending timer
    pub fn cancel_timers(&mut self) {
        self.show_timer.cancel();
        self.dismiss_timer.cancel();
        self.removal_timer.cancel();
    }

    #[cfg(test)]
    pub fn has_pending_timers(&self) -> bool {
        self.show_timer.is_armed() || self.dismiss_timer.is_armed() || self.removal_timer.is_armed()
    }

    /// How far the toast is pushed off screen, from 0.0 (fully in) to 1.0 (fully out)
    pub fn slide_offset(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.transition_started);
        let progress = (elapsed.as_secs_f32() / Self::TRANSITION.as_secs_f32()).clamp(0.0, 1.0);
        let eased = simple_easing::cubic_in_out(progress);
        match self.visibility {
            Visibility::Entering | Visibility::Removed => 1.0,
            Visibility::Shown => 1.0 - eased,
            Visibility::Leaving => eased,
        }
    }
}

/// Owns every live notification
#[derive(Debug, Clone)]
pub struct Notifier {
    notifications: Vec<Notification>,
    default_duration: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Notification::DEFAULT_DURATION)
    }
}

impl Notifier {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            notifications: Vec::new(),
            default_duration,
        }
    }

    /// Raise a notification with the default duration
    pub fn show(&mut self, message: &str, severity: Severity, now: Instant) -> NotificationId {
        self.show_for(message, severity, self.default_duration, now)
    }

    /// Raise a notification with an explicit duration (zero = sticky)
    pub fn show_for(
        &mut self,
        message: &str,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) -> NotificationId {
        let notification = Notification::new(message, severity, duration, now);
        let id = notification.id;
        tracing::debug!(?id, severity = severity.label(), "notification raised");
        self.notifications.push(notification);
        id
    }

    /// Close a notification. Closing one that is already gone is a no-op.
    pub fn dismiss(&mut self, id: NotificationId, now: Instant) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => notification.close(now),
            None => {
                tracing::debug!(?id, "dismiss ignored, notification already removed");
                false
            }
        }
    }

    /// Close the newest notification that is still on screen
    pub fn dismiss_latest(&mut self, now: Instant) -> bool {
        self.notifications
            .iter_mut()
            .rev()
            .find(|n| matches!(n.visibility, Visibility::Entering | Visibility::Shown))
            .is_some_and(|n| n.close(now))
    }

    /// Advance every notification's timers and drop removed ones
    pub fn tick(&mut self, now: Instant) {
        for notification in &mut self.notifications {
            notification.tick(now);
        }
        self.notifications
            .retain(|n| n.visibility != Visibility::Removed);
    }

    #[cfg(test)]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Notifications in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Drop every notification and its timers
    pub fn teardown(&mut self) {
        for notification in &mut self.notifications {
            notification.cancel_timers();
        }
        self.notifications.clear();
    }
}
