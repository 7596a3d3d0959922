//! Form field value objects

use super::validation::ValidationError;
use crate::state::DeadlineTimer;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Semantic kind of a form control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Textarea,
    Select,
}

/// Result of the last validation pass over a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Valid,
    Invalid(ValidationError),
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Choices for select fields, empty otherwise
    pub options: Vec<String>,
    pub value: String,
    pub validity: Validity,
    /// Inline error message shown under the field
    pub error_annotation: Option<String>,
    /// Marks the field invalid for assistive technology
    pub aria_invalid: bool,
    /// "Filled" decoration: the label floats above a focused or non-empty field
    pub filled: bool,
    /// Pending debounced validation
    pub debounce: DeadlineTimer,
}

impl FormField {
    /// Create a new empty field
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            options: Vec::new(),
            value: String::new(),
            validity: Validity::Valid,
            error_annotation: None,
            aria_invalid: false,
            filled: false,
            debounce: DeadlineTimer::default(),
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the choices of a select field
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Pre-fill the field. A pre-filled field starts decorated.
    #[cfg(test)]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.filled = !self.value.is_empty();
        self
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Textarea
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.validity, Validity::Invalid(_))
    }

    /// Push a character to the field value (select fields ignore typing)
    pub fn push_char(&mut self, c: char) -> bool {
        if self.kind == FieldKind::Select {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        if self.kind == FieldKind::Select {
            return false;
        }
        self.value.pop().is_some()
    }

    /// Step through the options of a select field. The empty value sits
    /// before the first option.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        if self.kind != FieldKind::Select || self.options.is_empty() {
            return false;
        }
        let count = self.options.len();
        let current = self.options.iter().position(|o| *o == self.value);
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(count - 1),
            (Some(i), true) if i + 1 < count => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
        self.value = next.map(|i| self.options[i].clone()).unwrap_or_default();
        true
    }

    /// Record an input event: drop the stale error and restart the debounce
    pub fn record_input(&mut self, now: Instant, debounce: Duration) {
        self.clear_error();
        self.debounce.reschedule(now, debounce);
    }

    /// Attach an inline error, replacing any previous one
    pub fn show_error(&mut self, error: ValidationError) {
        self.clear_error();
        self.error_annotation = Some(error.to_string());
        self.aria_invalid = true;
        self.validity = Validity::Invalid(error);
    }

    /// Remove the inline error and invalid marker
    pub fn clear_error(&mut self) {
        self.error_annotation = None;
        self.aria_invalid = false;
        self.validity = Validity::Valid;
    }

    pub fn focus(&mut self) {
        self.filled = true;
    }

    pub fn blur(&mut self) {
        if self.value.is_empty() {
            self.filled = false;
        }
    }

    /// Clear the value and every piece of decoration
    pub fn reset(&mut self) {
        self.value.clear();
        self.filled = false;
        self.debounce.cancel();
        self.clear_error();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.kind == FieldKind::Select && self.value.is_empty() {
            return "Select an option".to_string();
        }
        self.value.clone()
    }
}

/// Declarative description of a field, as read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

impl From<&FieldSpec> for FormField {
    fn from(spec: &FieldSpec) -> Self {
        let field = FormField::new(&spec.name, &spec.label, spec.kind)
            .with_options(spec.options.clone());
        if spec.required {
            field.required()
        } else {
            field
        }
    }
}
