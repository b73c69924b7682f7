//! Field rules for the reservation form.
//!
//! Every pass rebuilds the whole error map from the current values; nothing is
//! carried over from a previous pass.

use std::{collections::BTreeMap, fmt, sync::LazyLock};

use chrono::{Local, NaiveDate};
use regex::Regex;
use shared::domain::{parse_date, parse_time, FormField, ReservationFormData};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const DATE_REQUIRED: &str = "Date is required";
pub const DATE_INVALID: &str = "Date is invalid";
pub const DATE_IN_PAST: &str = "Date cannot be in the past";
pub const TIME_REQUIRED: &str = "Time is required";
pub const TIME_INVALID: &str = "Time is invalid";

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Source of "today" for the past-date rule.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Drops one field's entry. Returns whether there was one.
    pub fn clear(&mut self, field: FormField) -> bool {
        self.errors.remove(&field).is_some()
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_SHAPE.is_match(raw.trim())
}

pub fn validate(form: &ReservationFormData, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }

    if form.email.trim().is_empty() {
        errors.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&form.email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }

    if form.phone.trim().is_empty() {
        errors.insert(FormField::Phone, PHONE_REQUIRED);
    }

    if form.date.trim().is_empty() {
        errors.insert(FormField::Date, DATE_REQUIRED);
    } else {
        match parse_date(&form.date) {
            None => errors.insert(FormField::Date, DATE_INVALID),
            // Day granularity: today itself is allowed.
            Some(date) if date < today => errors.insert(FormField::Date, DATE_IN_PAST),
            Some(_) => {}
        }
    }

    if form.time.trim().is_empty() {
        errors.insert(FormField::Time, TIME_REQUIRED);
    } else if parse_time(&form.time).is_none() {
        errors.insert(FormField::Time, TIME_INVALID);
    }

    errors
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
