//! Layout components (content area, status bar)

use crate::app::App;
use crate::controller::SubmissionState;
use crate::platform::SUBMIT_HINT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Page-wide submission guard
    let guard_status = if app.is_page_busy() {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Green))
    };
    spans.push(guard_status);

    if let Some(controller) = app.active_controller() {
        if let Some((label, color)) =
            submission_label(controller.state(), controller.last_settled())
        {
            spans.push(Span::styled(format!("{label} "), Style::default().fg(color)));
        }
    }

    let hints = get_view_hints(&app.state.current_view, app.controllers.len());
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.endpoint.as_str(),
        Style::default().fg(Color::Blue),
    ));

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Short label for the active form's submission state
fn submission_label(
    state: SubmissionState,
    last_settled: Option<SubmissionState>,
) -> Option<(&'static str, Color)> {
    match (state, last_settled) {
        (SubmissionState::Submitting, _) => Some(("sending", Color::Yellow)),
        (_, Some(SubmissionState::Succeeded)) => Some(("sent", Color::Green)),
        (_, Some(SubmissionState::Failed)) => Some(("failed", Color::Red)),
        _ => None,
    }
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View, form_count: usize) -> String {
    match view {
        View::Form if form_count > 1 => {
            format!("Tab:next  {SUBMIT_HINT}  F2:form  Esc:close toast")
        }
        View::Form => format!("Tab:next  {SUBMIT_HINT}  Esc:close toast"),
        View::ThankYou => "Esc:back  q:quit".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_status_line() {
        let content = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(content, Rect::new(0, 0, 80, 23));
    }

    #[test]
    fn test_submission_label() {
        assert_eq!(submission_label(SubmissionState::Idle, None), None);
        assert_eq!(
            submission_label(SubmissionState::Submitting, Some(SubmissionState::Failed)),
            Some(("sending", Color::Yellow))
        );
        assert_eq!(
            submission_label(SubmissionState::Idle, Some(SubmissionState::Succeeded)),
            Some(("sent", Color::Green))
        );
        assert_eq!(
            submission_label(SubmissionState::Idle, Some(SubmissionState::Failed)),
            Some(("failed", Color::Red))
        );
    }

    #[test]
    fn test_form_switch_hint_only_with_several_forms() {
        assert!(!get_view_hints(&View::Form, 1).contains("F2"));
        assert!(get_view_hints(&View::Form, 2).contains("F2:form"));
        assert!(get_view_hints(&View::ThankYou, 1).contains("Esc:back"));
    }
}
