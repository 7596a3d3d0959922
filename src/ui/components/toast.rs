//! Toast notifications stacked in the top-right corner

use crate::state::{Notification, NotificationId, Notifier, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

/// Maximum width of a toast, borders included
const TOAST_MAX_WIDTH: u16 = 48;
/// Gap between the toast and the screen edge
const TOAST_MARGIN: u16 = 1;
/// Close control drawn as the toast title
const CLOSE_CONTROL: &str = " × ";

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Where a toast lands on screen
struct ToastSlot<'a> {
    notification: &'a Notification,
    area: Rect,
    lines: Vec<String>,
}

/// Stack live notifications from the top-right corner, newest first
fn layout_toasts<'a>(screen: Rect, notifier: &'a Notifier, now: Instant) -> Vec<ToastSlot<'a>> {
    let width = TOAST_MAX_WIDTH.min(screen.width.saturating_sub(TOAST_MARGIN * 2));
    if width < 8 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut y = screen.y + TOAST_MARGIN;
    for notification in notifier.iter().collect::<Vec<_>>().into_iter().rev() {
        let lines = wrap_text(&notification.message, (width - 6) as usize);
        let height = lines.len() as u16 + 2;
        if y + height > screen.y + screen.height {
            break;
        }

        let resting_x = screen.x + screen.width - width - TOAST_MARGIN;
        let offset = toast_offset(notification, now, width + TOAST_MARGIN);
        let x = resting_x + offset;
        let visible_width = (screen.x + screen.width).saturating_sub(x).min(width);
        if visible_width > 2 {
            slots.push(ToastSlot {
                notification,
                area: Rect {
                    x,
                    y,
                    width: visible_width,
                    height,
                },
                lines,
            });
        }
        y += height;
    }
    slots
}

/// Render every live notification, newest at the top
pub fn render_toasts(frame: &mut Frame, notifier: &Notifier, now: Instant, ascii_icons: bool) {
    for slot in layout_toasts(frame.area(), notifier, now) {
        render_toast(frame, slot.area, slot.notification, slot.lines, ascii_icons);
    }
}

/// The notification whose close control sits under `(column, row)`
pub fn close_control_at(
    screen: Rect,
    notifier: &Notifier,
    now: Instant,
    column: u16,
    row: u16,
) -> Option<NotificationId> {
    layout_toasts(screen, notifier, now)
        .into_iter()
        .find(|slot| {
            let close = close_control_area(slot.area);
            row == close.y && column >= close.x && column < close.x + close.width
        })
        .map(|slot| slot.notification.id)
}

/// The " × " title cells on the toast's top border
fn close_control_area(toast: Rect) -> Rect {
    Rect {
        x: toast.x + 1,
        y: toast.y,
        width: CLOSE_CONTROL.chars().count() as u16,
        height: 1,
    }
    .intersection(toast)
}

/// Horizontal shift of a sliding toast, in columns
fn toast_offset(notification: &Notification, now: Instant, travel: u16) -> u16 {
    (notification.slide_offset(now) * f32::from(travel)).round() as u16
}

fn render_toast(
    frame: &mut Frame,
    area: Rect,
    notification: &Notification,
    lines: Vec<String>,
    ascii_icons: bool,
) {
    let color = severity_color(notification.severity);
    let icon = notification.severity.icon(ascii_icons);

    let content: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let lead = if i == 0 {
                Span::styled(
                    format!("{icon} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            Line::from(vec![lead, Span::raw(line)])
        })
        .collect();

    frame.render_widget(Clear, area);
    let toast = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(CLOSE_CONTROL, Style::default().fg(Color::DarkGray)))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(toast, area);
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.len() + word.len() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
