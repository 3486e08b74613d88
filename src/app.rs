//! Application state and core logic

use crate::config::SiteConfig;
use crate::controller::{FormController, SubmitAttempt};
use crate::i18n::Catalog;
use crate::state::{AppState, FieldKind, NotificationCenter, SiteForm, View};
use crate::submit::{SubmitGuard, SubmitTransport};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Busy indicator frames for the submit control
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main application struct
pub struct App {
    /// Current navigation state
    pub state: AppState,
    /// One controller per form on the page
    pub controllers: Vec<FormController>,
    pub notifications: NotificationCenter,
    pub catalog: &'static Catalog,
    /// Resolved endpoint shown in the status bar
    pub endpoint: String,
    guard: SubmitGuard,
    quit: bool,
    started_at: Instant,
}

impl App {
    /// Create the app and attach a controller to every configured form
    pub fn new(config: &SiteConfig, endpoint: String, transport: Arc<dyn SubmitTransport>) -> Self {
        let catalog = config.locale.catalog();
        let guard = SubmitGuard::new();
        let timing = config.submit_timing();

        let controllers: Vec<_> = config
            .forms
            .iter()
            .map(|schema| {
                FormController::new(
                    SiteForm::from_schema(schema),
                    guard.clone(),
                    Arc::clone(&transport),
                    timing.clone(),
                    catalog,
                )
            })
            .collect();
        tracing::info!(forms = controllers.len(), %endpoint, "forms discovered");

        Self {
            state: AppState::default(),
            controllers,
            notifications: NotificationCenter::new(
                config.notification_duration(),
                config.notification_fade(),
            ),
            catalog,
            endpoint,
            guard,
            quit: false,
            started_at: Instant::now(),
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether any form on the page is submitting
    pub fn is_page_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn active_controller(&self) -> Option<&FormController> {
        self.controllers.get(self.state.active_form)
    }

    fn active_controller_mut(&mut self) -> Option<&mut FormController> {
        self.controllers.get_mut(self.state.active_form)
    }

    /// Frame of the busy indicator at `now`
    pub fn spinner_frame(&self, now: Instant) -> char {
        let step = now.saturating_duration_since(self.started_at).as_millis() / 80;
        SPINNER_FRAMES[step as usize % SPINNER_FRAMES.len()]
    }

    /// Advance timers: in-flight submissions, toast expiry and redirects
    pub fn tick(&mut self, now: Instant) {
        for controller in self.controllers.iter_mut() {
            if let Some(redirect) = controller.tick(&mut self.notifications, now) {
                self.state.schedule_redirect(redirect);
            }
        }
        self.notifications.tick(now);
        self.state.follow_due_redirect(now);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    /// Handle a key press at `now`
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        match self.state.current_view {
            View::Form => self.handle_form_key(key, now),
            View::ThankYou => self.handle_thank_you_key(key),
        }
    }

    fn handle_thank_you_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => self.state.back_to_form(),
            KeyCode::Char('q') => self.request_quit(),
            _ => {}
        }
    }

    /// Handle keys on the form view
    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(controller) = self.active_controller() else {
            return;
        };
        let form = controller.form();
        let on_submit_row = form.is_submit_row_active();
        let in_textarea = form.is_active_field_multiline();
        let active_kind = form.get_field(form.active_field()).map(|f| f.kind());
        let submit_shortcut = key.code == KeyCode::Char('s')
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER));

        match key.code {
            _ if submit_shortcut => self.submit_active(now),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::F(2) => self.switch_form(),
            KeyCode::Esc => {
                self.notifications.dismiss_latest(now);
            }
            KeyCode::Enter if in_textarea => self.edit_active('\n'),
            // Enter anywhere else submits the form, as a browser would
            KeyCode::Enter => self.submit_active(now),
            KeyCode::Char(c)
                if !on_submit_row && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                if active_kind == Some(FieldKind::Checkbox) && c != ' ' {
                    return;
                }
                self.edit_active(c);
            }
            KeyCode::Backspace if !on_submit_row => self.backspace_active(),
            _ => {}
        }
    }

    fn submit_active(&mut self, now: Instant) {
        let Some(controller) = self.controllers.get_mut(self.state.active_form) else {
            return;
        };
        if let SubmitAttempt::Invalid { .. } = controller.submit(&mut self.notifications, now) {
            // Focus the first invalid field so the visitor can fix it
            let form = controller.form_mut();
            if let Some(index) = form.fields.iter().position(|f| f.is_invalid()) {
                form.set_active_field(index);
            }
        }
    }

    /// Move focus, validating the field that loses it
    fn move_focus(&mut self, forward: bool) {
        let Some(controller) = self.active_controller_mut() else {
            return;
        };
        let leaving = controller.form().active_field();
        controller.blur(leaving);
        let form = controller.form_mut();
        if forward {
            form.next_field();
        } else {
            form.prev_field();
        }
    }

    fn switch_form(&mut self) {
        if let Some(controller) = self.active_controller_mut() {
            let leaving = controller.form().active_field();
            controller.blur(leaving);
        }
        self.state.next_form(self.controllers.len());
    }

    fn edit_active(&mut self, c: char) {
        let Some(controller) = self.active_controller_mut() else {
            return;
        };
        let index = controller.form().active_field();
        if let Some(field) = controller.form_mut().get_active_field_mut() {
            field.push_char(c);
        }
        controller.input(index);
    }

    fn backspace_active(&mut self) {
        let Some(controller) = self.active_controller_mut() else {
            return;
        };
        let index = controller.form().active_field();
        if let Some(field) = controller.form_mut().get_active_field_mut() {
            field.pop_char();
        }
        controller.input(index);
    }

    /// How long the event loop may wait for input before the next tick
    pub fn poll_interval(&self) -> Duration {
        let submitting = self.controllers.iter().any(|c| c.is_submitting());
        if submitting || self.state.pending_redirect.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        }
    }
}
