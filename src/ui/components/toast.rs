//! Toast stack rendering
//!
//! Toasts stack downward from the top-right corner of the content area,
//! oldest first, each with a close affordance in its title.

use crate::i18n::Catalog;
use crate::state::{Notification, NotificationCenter, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Maximum width of a toast, borders included
const TOAST_WIDTH: u16 = 44;

/// Border color for a toast severity
fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

/// Draw every visible toast over `area`
pub fn draw_toasts(
    frame: &mut Frame,
    area: Rect,
    notifications: &NotificationCenter,
    catalog: &Catalog,
) {
    let width = TOAST_WIDTH.min(area.width);
    if !notifications.has_container() || width < 6 {
        return;
    }
    let x = area.x + area.width - width;
    let bottom = area.y.saturating_add(area.height);
    let mut y = area.y.saturating_add(1);

    for toast in notifications.visible() {
        let lines = wrap_text(&toast.message, (width - 4) as usize);
        let height = toast_height(lines.len());
        if y.saturating_add(height) > bottom {
            break;
        }
        let toast_area = Rect {
            x,
            y,
            width,
            height,
        };
        draw_toast(frame, toast_area, toast, lines, catalog);
        y = y.saturating_add(height);
    }
}

/// Rows taken by a toast of `line_count` wrapped lines, borders included
fn toast_height(line_count: usize) -> u16 {
    u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

fn draw_toast(
    frame: &mut Frame,
    area: Rect,
    toast: &Notification,
    lines: Vec<String>,
    catalog: &Catalog,
) {
    let color = severity_color(toast.severity);

    // Clear the area behind the toast
    frame.render_widget(Clear, area);

    let content: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(format!(" {l}")))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title_top(
            Line::from(Span::styled(
                format!(" × {} ", catalog.close),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .style(Style::default().bg(Color::Black)),
        area,
    );
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        lines.push(current_line);
    }

    lines
}
