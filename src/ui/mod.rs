//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod thank_you;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let main_area = layout::create_layout(frame.area());

    match &app.state.current_view {
        View::Form => forms::draw_form(frame, main_area, app, now),
        View::ThankYou => thank_you::draw(frame, main_area, app),
    }

    // Toasts float above whatever page is showing
    components::draw_toasts(frame, main_area, &app.notifications, app.catalog);

    layout::draw_status_bar(frame, app);
}
