//! Client-facing form checks. Everything here is a pure function of its
//! inputs; invalid input yields `false` or a message, never an error.

use serde::Serialize;

pub mod account;
pub mod form;

pub use account::{
    compute_age, passwords_match, validate_email, validate_password, validate_registration,
    AgeCheck, RegistrationForm,
};
pub use form::{step_status, validate_basic_info, validate_details, validate_form, StepStatus};

/// A single user-facing complaint about one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
