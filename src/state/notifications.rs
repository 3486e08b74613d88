//! Toast notifications
//!
//! Toasts live in a single container that is created on first use. Each toast
//! expires on its own schedule; dismissed toasts stop being visible at once and
//! are dropped from the container after a short fade.

use std::time::{Duration, Instant};

/// Visual severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// A single toast message
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
    dismissed_at: Option<Instant>,
}

impl Notification {
    pub fn is_dismissed(&self) -> bool {
        self.dismissed_at.is_some()
    }
}

#[derive(Debug, Default)]
struct ToastContainer {
    toasts: Vec<Notification>,
}

/// Owner of every toast on the page
#[derive(Debug)]
pub struct NotificationCenter {
    container: Option<ToastContainer>,
    next_id: u64,
    duration: Duration,
    fade: Duration,
}

impl NotificationCenter {
    pub fn new(duration: Duration, fade: Duration) -> Self {
        Self {
            container: None,
            next_id: 1,
            duration,
            fade,
        }
    }

    /// Show a toast now
    #[cfg(test)]
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.show_at(message, severity, Instant::now())
    }

    /// Show a toast created at `now`; returns its id
    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let container = self.container.get_or_insert_with(ToastContainer::default);
        container.toasts.push(Notification {
            id,
            message: message.into(),
            severity,
            created_at: now,
            dismissed_at: None,
        });
        tracing::debug!(id, ?severity, "notification shown");
        id
    }

    /// Dismiss a toast via its close affordance
    pub fn dismiss(&mut self, id: u64, now: Instant) -> bool {
        let Some(container) = self.container.as_mut() else {
            return false;
        };
        match container
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.dismissed_at.is_none())
        {
            Some(toast) => {
                toast.dismissed_at = Some(now);
                true
            }
            None => false,
        }
    }

    /// Dismiss the most recently shown visible toast
    pub fn dismiss_latest(&mut self, now: Instant) -> bool {
        match self.visible().last().map(|t| t.id) {
            Some(id) => self.dismiss(id, now),
            None => false,
        }
    }

    /// Expire toasts whose time is up and drop faded ones
    pub fn tick(&mut self, now: Instant) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        for toast in container.toasts.iter_mut() {
            if toast.dismissed_at.is_none()
                && now.saturating_duration_since(toast.created_at) >= self.duration
            {
                toast.dismissed_at = Some(now);
            }
        }
        let fade = self.fade;
        container.toasts.retain(|t| match t.dismissed_at {
            Some(at) => now.saturating_duration_since(at) < fade,
            None => true,
        });
    }

    /// Visible toasts in arrival order
    pub fn visible(&self) -> Vec<&Notification> {
        self.container
            .iter()
            .flat_map(|c| c.toasts.iter())
            .filter(|t| !t.is_dismissed())
            .collect()
    }

    /// Number of toasts still attached to the container, fading ones included
    #[cfg(test)]
    pub fn attached(&self) -> usize {
        self.container.as_ref().map_or(0, |c| c.toasts.len())
    }

    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// Message of the newest visible toast
    #[cfg(test)]
    pub fn latest_message(&self) -> Option<&str> {
        self.visible().last().map(|t| t.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> NotificationCenter {
        NotificationCenter::new(Duration::from_millis(5000), Duration::from_millis(150))
    }

    #[test]
    fn test_container_is_created_lazily() {
        let mut center = center();
        assert!(!center.has_container());
        center.show("hallo", Severity::Info);
        assert!(center.has_container());
    }

    #[test]
    fn test_toasts_stack_in_arrival_order() {
        let mut center = center();
        let now = Instant::now();
        center.show_at("one", Severity::Info, now);
        center.show_at("two", Severity::Danger, now);

        let messages: Vec<_> = center.visible().iter().map(|t| t.message.clone()).collect();
        assert_eq!(messages, vec!["one", "two"]);
        assert_eq!(center.latest_message(), Some("two"));
    }

    #[test]
    fn test_auto_dismiss_after_duration() {
        let mut center = center();
        let now = Instant::now();
        center.show_at("bye", Severity::Success, now);

        center.tick(now + Duration::from_millis(4999));
        assert_eq!(center.visible().len(), 1);

        center.tick(now + Duration::from_millis(5000));
        assert!(center.visible().is_empty());
        assert_eq!(center.attached(), 1);

        center.tick(now + Duration::from_millis(5150));
        assert_eq!(center.attached(), 0);
    }

    #[test]
    fn test_expiry_is_independent_per_toast() {
        let mut center = center();
        let now = Instant::now();
        center.show_at("early", Severity::Info, now);
        center.show_at("late", Severity::Info, now + Duration::from_secs(3));

        center.tick(now + Duration::from_secs(6));
        assert_eq!(center.latest_message(), Some("late"));
        assert_eq!(center.visible().len(), 1);
    }

    #[test]
    fn test_manual_dismiss_hides_immediately() {
        let mut center = center();
        let now = Instant::now();
        let id = center.show_at("close me", Severity::Warning, now);

        assert!(center.dismiss(id, now));
        assert!(center.visible().is_empty());
        assert!(!center.dismiss(id, now));

        center.tick(now + Duration::from_millis(150));
        assert_eq!(center.attached(), 0);
    }

    #[test]
    fn test_dismiss_latest() {
        let mut center = center();
        let now = Instant::now();
        center.show_at("one", Severity::Info, now);
        center.show_at("two", Severity::Info, now);

        assert!(center.dismiss_latest(now));
        assert_eq!(center.latest_message(), Some("one"));
    }

    #[test]
    fn test_dismiss_without_container() {
        let mut center = center();
        assert!(!center.dismiss(1, Instant::now()));
        assert!(!center.dismiss_latest(Instant::now()));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut center = center();
        let a = center.show("a", Severity::Info);
        let b = center.show("b", Severity::Info);
        assert_ne!(a, b);
    }
}
