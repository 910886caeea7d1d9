use std::collections::BTreeMap;

use chrono::NaiveDate;
use email_address::EmailAddress;
use strum_macros::AsRefStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum FieldError {
    #[strum(serialize = "required")]
    Required,
    #[strum(serialize = "email")]
    InvalidEmail,
    #[strum(serialize = "date")]
    InvalidDate,
}

/// Field name to the errors found on it. Fields without errors are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, error: FieldError) {
        self.errors.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> &[FieldError] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_field_valid(&self, field: &str) -> bool {
        self.field(field).is_empty()
    }

    pub fn has_error(&self, field: &str, error: FieldError) -> bool {
        self.field(field).contains(&error)
    }
}

pub fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, FieldError::Required);
    }
}

/// Required, and a well formed address when present.
pub fn email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, FieldError::Required);
    } else if !EmailAddress::is_valid(value) {
        errors.push(field, FieldError::InvalidEmail);
    }
}

/// Required, and a `YYYY-MM-DD` calendar date when present.
pub fn date(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, FieldError::Required);
    } else if parse_date(value).is_none() {
        errors.push(field, FieldError::InvalidDate);
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
