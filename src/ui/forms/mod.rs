//! Form rendering module
//!
//! - `field_renderer`: single field with its inline error
//! - `contact_form`: the scrolling contact form

mod contact_form;
mod field_renderer;

pub use contact_form::draw_contact_form;
