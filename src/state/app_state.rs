//! Application state definitions

use crate::controller::Redirect;
use std::time::Instant;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The page's forms
    #[default]
    Form,
    /// Destination reached after a successful submission
    ThankYou,
}

/// Navigation state shared by the event loop and the renderer
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Index of the form shown on the page
    pub active_form: usize,
    /// Navigation scheduled after a successful submission
    pub pending_redirect: Option<Redirect>,
    /// Page the visitor was sent to
    pub destination: Option<String>,
}

impl AppState {
    /// Cycle to the next form, wrapping around
    pub fn next_form(&mut self, form_count: usize) {
        if form_count > 0 {
            self.active_form = (self.active_form + 1) % form_count;
        }
    }

    pub fn schedule_redirect(&mut self, redirect: Redirect) {
        tracing::debug!(destination = %redirect.destination, "redirect scheduled");
        self.pending_redirect = Some(redirect);
    }

    /// Follow the scheduled redirect once it is due
    pub fn follow_due_redirect(&mut self, now: Instant) -> bool {
        match self.pending_redirect.take() {
            Some(redirect) if redirect.is_due(now) => {
                tracing::info!(destination = %redirect.destination, "navigating");
                self.destination = Some(redirect.destination);
                self.current_view = View::ThankYou;
                true
            }
            other => {
                self.pending_redirect = other;
                false
            }
        }
    }

    /// Leave the destination page and return to the forms
    pub fn back_to_form(&mut self) {
        self.current_view = View::Form;
        self.destination = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn redirect_at(at: Instant) -> Redirect {
        Redirect {
            destination: "thank_you.html".to_string(),
            at,
        }
    }

    #[test]
    fn test_default_view_is_form() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Form);
        assert!(state.pending_redirect.is_none());
    }

    #[test]
    fn test_redirect_waits_until_due() {
        let mut state = AppState::default();
        let now = Instant::now();
        state.schedule_redirect(redirect_at(now + Duration::from_secs(1)));

        assert!(!state.follow_due_redirect(now));
        assert!(state.pending_redirect.is_some());
        assert_eq!(state.current_view, View::Form);

        assert!(state.follow_due_redirect(now + Duration::from_secs(1)));
        assert!(state.pending_redirect.is_none());
        assert_eq!(state.current_view, View::ThankYou);
        assert_eq!(state.destination.as_deref(), Some("thank_you.html"));
    }

    #[test]
    fn test_no_redirect_is_noop() {
        let mut state = AppState::default();
        assert!(!state.follow_due_redirect(Instant::now()));
    }

    #[test]
    fn test_back_to_form() {
        let mut state = AppState::default();
        let now = Instant::now();
        state.schedule_redirect(redirect_at(now));
        state.follow_due_redirect(now);

        state.back_to_form();
        assert_eq!(state.current_view, View::Form);
        assert!(state.destination.is_none());
    }

    #[test]
    fn test_next_form_wraps() {
        let mut state = AppState::default();
        state.next_form(2);
        assert_eq!(state.active_form, 1);
        state.next_form(2);
        assert_eq!(state.active_form, 0);
        state.next_form(0);
        assert_eq!(state.active_form, 0);
    }
}
