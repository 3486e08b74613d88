//! Field rendering utilities for forms

use crate::state::{FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a field, borders included
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        6
    } else {
        3
    }
}

/// Border color: errors win over focus
fn border_color(field: &FormField, is_active: bool) -> Color {
    if field.visible_error().is_some() {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

/// Block title: the label with a marker on required fields
fn field_title(field: &FormField) -> String {
    if field.schema.required {
        format!(" {} * ", field.schema.label)
    } else {
        format!(" {} ", field.schema.label)
    }
}

/// Draw a form field with its validation feedback on the bottom border
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if is_active { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let content = match field.kind() {
        FieldKind::Checkbox => Paragraph::new(Line::from(vec![
            Span::styled(field.display_value(), style),
            Span::raw(" "),
            Span::styled(field.schema.label.as_str(), style),
        ])),
        _ if field.is_multiline() => {
            let value = field.display_value();
            let mut lines: Vec<Line> = value
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), style)))
                .collect();
            if is_active {
                if let Some(last) = lines.last_mut() {
                    last.spans.push(Span::styled(cursor, cursor_style));
                }
            }
            Paragraph::new(lines)
        }
        _ => Paragraph::new(Line::from(vec![
            Span::styled(field.display_value(), style),
            Span::styled(cursor, cursor_style),
        ])),
    };

    let mut block = Block::default()
        .title(field_title(field))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(field, is_active)));

    if let Some(error) = field.visible_error() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
