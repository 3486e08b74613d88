//! Button component for TUI

use crate::state::SubmitButton;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a form's submit control, with a spinner while it is busy
pub fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    button: &SubmitButton,
    is_selected: bool,
    spinner: Option<char>,
) {
    render_button(
        frame,
        area,
        &submit_content(button, spinner),
        is_selected,
        !button.disabled,
    );
}

fn submit_content(button: &SubmitButton, spinner: Option<char>) -> String {
    match spinner {
        Some(frame) if button.disabled => format!("{frame} {}", button.label),
        _ => button.label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_content_idle() {
        let button = SubmitButton::new("Versturen");
        assert_eq!(submit_content(&button, None), "Versturen");
        assert_eq!(submit_content(&button, Some('⠋')), "Versturen");
    }

    #[test]
    fn test_submit_content_busy_shows_spinner() {
        let mut button = SubmitButton::new("Versturen");
        button.enter_busy("Verzenden...");
        assert_eq!(submit_content(&button, Some('⠋')), "⠋ Verzenden...");
    }
}
