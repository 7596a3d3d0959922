//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a field box, plus one for its inline error
pub fn field_height(field: &FormField) -> u16 {
    let body = if field.is_multiline() { 5 } else { 3 };
    body + 1
}

/// Draw a form field and the inline error line beneath it
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_style = if field.aria_invalid {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let box_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let error_area = Rect {
        y: area.y + box_area.height,
        height: area.height.min(1),
        ..area
    };

    let required_mark = if field.required { " *" } else { "" };
    // The label floats into the border once the field is decorated
    let title = if field.filled {
        format!(" {}{} ", field.label, required_mark)
    } else {
        String::new()
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let content = if !field.filled && field.value.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            format!("{}{}", field.label, required_mark),
            Style::default().fg(Color::DarkGray),
        )))
    } else if field.is_multiline() {
        let mut lines: Vec<Line> = field
            .value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        Paragraph::new(lines)
    } else {
        let value_style = if field.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        Paragraph::new(Line::from(vec![
            Span::styled(field.display_value(), value_style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), box_area);

    if let Some(error) = &field.error_annotation {
        let line = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(line, error_area);
    }
}
