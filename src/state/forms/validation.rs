//! Field validation rules

use super::field::{FieldKind, FormField};
use crate::i18n::Catalog;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s+\-()]{10,20}$").expect("phone pattern"));

static PERSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s\-']{2,50}$").expect("name pattern"));

/// Why a field's current value is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidName,
    TooShort { min: usize },
    MustAgree,
}

impl ValidationError {
    /// Human-readable message in the catalog's language
    pub fn message(&self, catalog: &Catalog) -> String {
        match self {
            Self::Required => catalog.required.to_string(),
            Self::InvalidEmail => catalog.invalid_email.to_string(),
            Self::InvalidPhone => catalog.invalid_phone.to_string(),
            Self::InvalidName => catalog.invalid_name.to_string(),
            Self::TooShort { min } => catalog.too_short(*min),
            Self::MustAgree => catalog.must_agree.to_string(),
        }
    }
}

/// Check a field's trimmed value against its declared constraints.
///
/// Rules run in a fixed order and the first failing rule is reported.
pub fn validate(field: &FormField) -> Option<ValidationError> {
    let schema = &field.schema;
    let value = field.raw_value().trim();

    if schema.required && value.is_empty() {
        return Some(ValidationError::Required);
    }

    // Checkboxes always carry their submit value, so they never stop here
    if value.is_empty() {
        return None;
    }

    if schema.kind == FieldKind::Email && !EMAIL.is_match(value) {
        return Some(ValidationError::InvalidEmail);
    }

    if schema.kind == FieldKind::Tel && !PHONE.is_match(value) {
        return Some(ValidationError::InvalidPhone);
    }

    if schema.is_person_name() && !PERSON_NAME.is_match(value) {
        return Some(ValidationError::InvalidName);
    }

    if schema.kind == FieldKind::Textarea {
        let min = schema.effective_min_length();
        if value.chars().count() < min {
            return Some(ValidationError::TooShort { min });
        }
    }

    if schema.kind == FieldKind::Checkbox && schema.required && !field.is_checked() {
        return Some(ValidationError::MustAgree);
    }

    None
}
