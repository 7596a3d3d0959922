//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;
use std::time::Instant;

pub use components::close_control_at;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);
    forms::draw_contact_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Toasts float above everything else
    components::render_toasts(frame, &app.notifier, now, app.ascii_icons);
}
