//! Form page rendering

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::SiteForm;
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};
use std::time::Instant;

/// Draw the active form with its fields and submit control
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let Some(controller) = app.active_controller() else {
        return;
    };
    let form = controller.form();

    let block = Block::default()
        .title(form_title(form, app.state.active_form, app.controllers.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let active = form.active_field();
    for (idx, field) in form.fields.iter().enumerate() {
        draw_field(frame, chunks[idx], field, idx == active);
    }

    let button_area = submit_area(chunks[form.fields.len()]);
    let spinner = form.submit.is_busy().then(|| app.spinner_frame(now));
    render_submit_button(
        frame,
        button_area,
        &form.submit,
        form.is_submit_row_active(),
        spinner,
    );
}

/// Block title, numbered when the page carries several forms
fn form_title(form: &SiteForm, index: usize, count: usize) -> String {
    if count > 1 {
        format!(" {} ({}/{}) ", form.title, index + 1, count)
    } else {
        format!(" {} ", form.title)
    }
}

/// The submit control sits left-aligned under the fields
fn submit_area(row: Rect) -> Rect {
    Rect {
        width: row.width.min(24),
        ..row
    }
}
