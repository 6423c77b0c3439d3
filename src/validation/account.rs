use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use time::Date;

use super::{is_blank, FieldError};
use crate::dates::parse_day_month_year;

pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 120;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[\w.+-]+@([\w-]+\.)+[\w-]{2,}$").unwrap();
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordIssue {
    #[error("Password must be at least 8 characters")]
    TooShort,
    #[error("Password must contain an uppercase letter")]
    NoUppercase,
    #[error("Password must contain a digit")]
    NoDigit,
    #[error("Password must contain a symbol")]
    NoSymbol,
    #[error("Password must not contain your name")]
    ContainsName,
}

/// Every rule the password breaks, in a stable order.
pub fn password_issues(password: &str, first_name: &str, last_name: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        issues.push(PasswordIssue::NoUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(PasswordIssue::NoDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        issues.push(PasswordIssue::NoSymbol);
    }

    let lowered = password.to_lowercase();
    let contains = |name: &str| {
        let name = name.trim();
        !name.is_empty() && lowered.contains(&name.to_lowercase())
    };
    if contains(first_name) || contains(last_name) {
        issues.push(PasswordIssue::ContainsName);
    }
    issues
}

pub fn validate_password(password: &str, first_name: &str, last_name: &str) -> bool {
    password_issues(password, first_name, last_name).is_empty()
}

pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("Invalid date format, expected DD/MM/YYYY")]
    InvalidFormat,
    #[error("Birth date cannot be in the future")]
    InFuture,
    #[error("You must be at least 13 years old")]
    TooYoung,
    #[error("Age cannot exceed 120 years")]
    TooOld,
}

/// Outcome of [`compute_age`]. `age` is present whenever the date parsed and
/// is not in the future, even if it is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeCheck {
    pub age: Option<i32>,
    pub error: Option<AgeError>,
}

impl AgeCheck {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

pub fn compute_age(birth_date: &str, today: Date) -> AgeCheck {
    let Some(birth) = parse_day_month_year(birth_date) else {
        return AgeCheck {
            age: None,
            error: Some(AgeError::InvalidFormat),
        };
    };
    if birth > today {
        return AgeCheck {
            age: None,
            error: Some(AgeError::InFuture),
        };
    }

    let mut age = today.year() - birth.year();
    if (today.month() as u8, today.day()) < (birth.month() as u8, birth.day()) {
        age -= 1;
    }

    let error = if age < MIN_AGE {
        Some(AgeError::TooYoung)
    } else if age > MAX_AGE {
        Some(AgeError::TooOld)
    } else {
        None
    };
    AgeCheck {
        age: Some(age),
        error,
    }
}

/// Sign-up form as typed by the user.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationForm<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub birth_date: &'a str,
    pub country: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

/// Runs every sign-up check and returns the computed age when all pass.
pub fn validate_registration(form: &RegistrationForm<'_>, today: Date) -> Result<i32, Vec<FieldError>> {
    let mut errors = Vec::new();

    if is_blank(form.name) {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if is_blank(form.surname) {
        errors.push(FieldError::new("surname", "Surname is required"));
    }
    if is_blank(form.country) {
        errors.push(FieldError::new("country", "Country is required"));
    }
    if !validate_email(form.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    for issue in password_issues(form.password, form.name, form.surname) {
        errors.push(FieldError::new("password", issue.to_string()));
    }
    if !passwords_match(form.password, form.password_confirmation) {
        errors.push(FieldError::new(
            "password_confirmation",
            "Passwords do not match",
        ));
    }

    let age = compute_age(form.birth_date, today);
    if let Some(message) = age.message() {
        errors.push(FieldError::new("birth_date", message));
    }

    match age.age {
        Some(age) if errors.is_empty() => Ok(age),
        _ => Err(errors),
    }
}
