//! Form domain layer
//!
//! Fields, the validation rules that annotate them, and the form that owns
//! them through the submit lifecycle.

mod field;
mod form_state;
mod validation;

pub use field::{FieldKind, FieldSpec, FormField};
pub use form_state::{default_field_specs, ContactForm, Form, SubmissionState};
pub use validation::ValidationError;

#[cfg(test)]
pub use field::Validity;
