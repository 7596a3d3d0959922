//! Form state management

use super::field::{FieldKind, FieldSpec, FormField};
use super::validation::validate_field;
use std::time::{Duration, Instant};

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Where a form is in its submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Done,
}

/// The form's submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    original_label: String,
    pub busy: bool,
}

impl SubmitButton {
    /// Label shown while a send is in flight
    pub const BUSY_LABEL: &'static str = "Sending...";

    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            original_label: label.to_string(),
            busy: false,
        }
    }

    /// Disable the control and show the busy label
    pub fn set_busy(&mut self) {
        self.busy = true;
        self.label = Self::BUSY_LABEL.to_string();
    }

    /// Re-enable the control with its original label
    pub fn restore(&mut self) {
        self.busy = false;
        self.label = self.original_label.clone();
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy
    }
}

/// An ordered set of fields plus the submit lifecycle
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub fields: Vec<FormField>,
    pub submit_button: Option<SubmitButton>,
    pub submission: SubmissionState,
    /// Focused row: a field index, or `fields.len()` for the submit button
    pub active_field_index: usize,
}

impl ContactForm {
    pub fn new(fields: Vec<FormField>, submit_button: Option<SubmitButton>) -> Self {
        let mut form = Self {
            fields,
            submit_button,
            submission: SubmissionState::Idle,
            active_field_index: 0,
        };
        if let Some(first) = form.fields.first_mut() {
            first.focus();
        }
        form
    }

    /// The default contact form
    pub fn contact() -> Self {
        Self::from_specs(&default_field_specs())
    }

    /// Build a form from a declarative field list
    pub fn from_specs(specs: &[FieldSpec]) -> Self {
        let fields = specs.iter().map(FormField::from).collect();
        Self::new(fields, Some(SubmitButton::new("Send Message")))
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[cfg(test)]
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Returns true if the submit button row is focused
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index >= self.fields.len()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// Move focus, validating the field that loses it
    pub fn move_focus(&mut self, index: usize) {
        let index = index.min(self.field_count().saturating_sub(1));
        if index == self.active_field_index {
            return;
        }
        if let Some(previous) = self.fields.get_mut(self.active_field_index) {
            previous.blur();
            validate_field(previous);
        }
        self.active_field_index = index;
        if let Some(next) = self.fields.get_mut(index) {
            next.focus();
        }
    }

    /// Type a character into the focused field
    pub fn input_char(&mut self, c: char, now: Instant, debounce: Duration) {
        if let Some(field) = self.get_active_field_mut() {
            if field.push_char(c) {
                field.record_input(now, debounce);
            }
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self, now: Instant, debounce: Duration) {
        if let Some(field) = self.get_active_field_mut() {
            if field.pop_char() {
                field.record_input(now, debounce);
            }
        }
    }

    /// Step the focused select field to its next or previous option
    pub fn cycle_option(&mut self, forward: bool, now: Instant, debounce: Duration) {
        if let Some(field) = self.get_active_field_mut() {
            if field.cycle_option(forward) {
                field.record_input(now, debounce);
            }
        }
    }

    /// Run debounced validations whose delay has elapsed
    pub fn tick(&mut self, now: Instant) {
        for field in &mut self.fields {
            if field.debounce.fire_if_due(now) && !field.value.is_empty() {
                validate_field(field);
            }
        }
    }

    /// Validate every field in order. True only if all pass.
    pub fn validate_form(&mut self) -> bool {
        self.fields
            .iter_mut()
            .fold(true, |all_valid, field| validate_field(field) && all_valid)
    }

    /// Index of the first invalid field in document order
    pub fn first_invalid(&self) -> Option<usize> {
        self.fields.iter().position(FormField::is_invalid)
    }

    /// Field values in document order
    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Clear every value and decoration
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }

    /// Cancel every pending timer owned by the form
    pub fn teardown(&mut self) {
        for field in &mut self.fields {
            field.debounce.cancel();
        }
    }

    /// Whether any field timer is still armed
    #[cfg(test)]
    pub fn has_pending_timers(&self) -> bool {
        self.fields.iter().any(|f| f.debounce.is_armed())
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::contact()
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        self.fields.len() + usize::from(self.submit_button.is_some())
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.move_focus(index);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

/// Field layout of the site's contact form
pub fn default_field_specs() -> Vec<FieldSpec> {
    let spec = |name: &str, label: &str, kind: FieldKind, required: bool| FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind,
        required,
        options: Vec::new(),
    };
    vec![
        spec("name", "Full Name", FieldKind::Text, true),
        spec("email", "Email Address", FieldKind::Email, true),
        spec("phone", "Phone Number", FieldKind::Tel, false),
        FieldSpec {
            options: vec![
                "Community Health Outreach".to_string(),
                "Training & Workshops".to_string(),
                "Partnerships".to_string(),
                "Other".to_string(),
            ],
            ..spec("service", "Service of Interest", FieldKind::Select, false)
        },
        spec("message", "Message", FieldKind::Textarea, true),
    ]
}
