//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{FieldKind, Form};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the page header
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Get in Touch ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "We'll get back to you within 24 hours",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission status
    let status = if app.is_submitting() {
        Span::styled(" ◌ sending ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(status);

    let active_kind = app
        .form
        .get_field(app.form.active_field())
        .map(|f| f.kind);
    spans.push(Span::styled(
        get_form_hints(active_kind),
        Style::default().fg(Color::Gray),
    ));

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused control
fn get_form_hints(active_kind: Option<FieldKind>) -> String {
    match active_kind {
        Some(FieldKind::Select) => format!("←/→:choose  Tab:next  {SUBMIT_SHORTCUT}:send  Esc:dismiss"),
        Some(FieldKind::Textarea) => {
            format!("Enter:newline  Tab:next  {SUBMIT_SHORTCUT}:send  Esc:dismiss")
        }
        Some(_) => format!("Tab:next  S-Tab:prev  {SUBMIT_SHORTCUT}:send  Esc:dismiss"),
        None => "Enter:send  Tab:next  Esc:dismiss".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_header_and_status() {
        let (header, content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, 1);
        assert_eq!(status.height, 1);
        assert_eq!(content.height, 22);
        assert_eq!(status.y, 23);
    }

    #[test]
    fn test_hints_follow_field_kind() {
        assert!(get_form_hints(Some(FieldKind::Select)).contains("choose"));
        assert!(get_form_hints(Some(FieldKind::Textarea)).contains("newline"));
        assert!(get_form_hints(None).starts_with("Enter:send"));
    }
}
