//! Field validation for student records.
//!
//! Every validator trims its input first, then checks, in order:
//!
//! 1. the value is not empty (`EmptyField`)
//! 2. the value has the expected shape (`InvalidFormat`)
//! 3. for ids only, no *other* record already uses it (`DuplicateKey`)
//!
//! Validators return data rather than touching any UI. Surfacing the message
//! next to the input (and clearing it once the value is fixed) is done by the
//! controller, which applies each result to the form's error indicators.
//!
//! The module also holds the entry-time filters used while the user types.
//! They only make typing friendlier; the full patterns are always re-checked on
//! blur and on submit.

use crate::model::Field;
use crate::store::RecordStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static CONTACT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10,}$").unwrap());

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    EmptyField,
    InvalidFormat,
    DuplicateKey,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::EmptyField => write!(f, "empty field"),
            ValidationKind::InvalidFormat => write!(f, "invalid format"),
            ValidationKind::DuplicateKey => write!(f, "duplicate key"),
        }
    }
}

/// A rejected field, with the message shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationKind,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, kind: ValidationKind, message: &str) -> Self {
        Self {
            field,
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

pub type FieldResult = std::result::Result<(), FieldError>;

pub fn validate_name(value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(
            Field::Name,
            ValidationKind::EmptyField,
            "Name is required",
        ));
    }
    if !NAME_PATTERN.is_match(value) {
        return Err(FieldError::new(
            Field::Name,
            ValidationKind::InvalidFormat,
            "Name should contain letters and spaces only",
        ));
    }
    Ok(())
}

/// Validates an id against the roster.
///
/// `edit_target` is the position being edited, if any. That record is skipped
/// by the duplicate check so re-saving a record with its own id passes.
pub fn validate_id(value: &str, roster: &RecordStore, edit_target: Option<usize>) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(
            Field::Id,
            ValidationKind::EmptyField,
            "Student ID is required",
        ));
    }
    if !ID_PATTERN.is_match(value) {
        return Err(FieldError::new(
            Field::Id,
            ValidationKind::InvalidFormat,
            "Student ID should contain only numbers",
        ));
    }
    if roster.is_duplicate_id(value, edit_target) {
        return Err(FieldError::new(
            Field::Id,
            ValidationKind::DuplicateKey,
            "Student ID already exists",
        ));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(
            Field::Email,
            ValidationKind::EmptyField,
            "Email is required",
        ));
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(FieldError::new(
            Field::Email,
            ValidationKind::InvalidFormat,
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

pub fn validate_contact(value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(
            Field::Contact,
            ValidationKind::EmptyField,
            "Contact number is required",
        ));
    }
    if !CONTACT_PATTERN.is_match(value) {
        return Err(FieldError::new(
            Field::Contact,
            ValidationKind::InvalidFormat,
            "Contact number must be at least 10 digits",
        ));
    }
    Ok(())
}

pub fn validate_field(
    field: Field,
    value: &str,
    roster: &RecordStore,
    edit_target: Option<usize>,
) -> FieldResult {
    match field {
        Field::Name => validate_name(value),
        Field::Id => validate_id(value, roster, edit_target),
        Field::Email => validate_email(value),
        Field::Contact => validate_contact(value),
    }
}

/// Strips everything but ASCII digits.
pub fn filter_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strips everything but ASCII letters and whitespace.
pub fn filter_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

/// Applies the entry-time filter that belongs to `field`.
pub fn filter_input(field: Field, raw: &str) -> String {
    match field {
        Field::Name => filter_name(raw),
        Field::Id | Field::Contact => filter_digits(raw),
        Field::Email => raw.to_string(),
    }
}
