//! Contact form rendering

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Widest the form box grows
const MAX_FORM_WIDTH: u16 = 72;

/// Draw the contact form, scrolled so the focused row stays visible
pub fn draw_contact_form(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width.min(MAX_FORM_WIDTH);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let border_color = if app.is_submitting() {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(" Contact Us ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let form = &app.form;
    let mut heights: Vec<u16> = form.fields.iter().map(field_height).collect();
    if form.submit_button.is_some() {
        heights.push(BUTTON_HEIGHT);
    }
    let first = first_visible_row(&heights, form.active_field_index, inner.height);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (index, height) in heights.iter().enumerate().skip(first) {
        if y + height > bottom {
            break;
        }
        let row = Rect {
            x: inner.x + 1,
            y,
            width: inner.width.saturating_sub(2),
            height: *height,
        };
        match form.fields.get(index) {
            Some(field) => draw_field(frame, row, field, index == form.active_field_index),
            None => {
                if let Some(button) = &form.submit_button {
                    let button_area = Rect {
                        width: (button.label.len() as u16 + 4).min(row.width),
                        ..row
                    };
                    render_button(
                        frame,
                        button_area,
                        &button.label,
                        form.is_submit_row_active(),
                        button.is_enabled(),
                    );
                }
            }
        }
        y += height;
    }
}

/// First row to draw so that `active` fits in `available` rows
fn first_visible_row(heights: &[u16], active: usize, available: u16) -> usize {
    let active = active.min(heights.len().saturating_sub(1));
    let mut first = 0;
    let mut used: u16 = heights.iter().take(active + 1).sum();
    while used > available && first < active {
        used -= heights[first];
        first += 1;
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits() {
        assert_eq!(first_visible_row(&[4, 4, 6, 3], 3, 30), 0);
    }

    #[test]
    fn test_scrolls_to_keep_active_visible() {
        // 4 + 4 + 4 + 4 + 6 + 3 = 25 rows in a 20 row window
        let heights = [4, 4, 4, 4, 6, 3];
        assert_eq!(first_visible_row(&heights, 0, 20), 0);
        assert_eq!(first_visible_row(&heights, 4, 20), 1);
        assert_eq!(first_visible_row(&heights, 5, 20), 2);
    }

    #[test]
    fn test_empty_form() {
        assert_eq!(first_visible_row(&[], 0, 10), 0);
    }
}
