use chrono::{NaiveDate, NaiveTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static INDEX_RE: OnceLock<Regex> = OnceLock::new();
static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

pub struct Validator;

impl Validator {
    /// The engine's stand-in for a null check: the counterpart must resolve.
    pub fn require_present<T>(value: Option<T>, what: &str) -> Result<T, AppError> {
        value.ok_or_else(|| AppError::ValidationError(format!("{} must not be absent", what)))
    }

    pub fn validate_name(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        if value.chars().count() > max_len {
            return Err(AppError::ValidationError(format!(
                "{} too long (max {} characters)",
                field, max_len
            )));
        }
        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<(), AppError> {
        let re = compiled(&EMAIL_RE, r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$");
        if !re.is_match(email) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        Ok(())
    }

    pub fn validate_phone(phone: &str) -> Result<(), AppError> {
        let re = compiled(&PHONE_RE, r"^\+?[0-9][0-9 \-]{7,18}[0-9]$");
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if !re.is_match(phone) || !(9..=15).contains(&digits) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid phone number",
                phone
            )));
        }
        Ok(())
    }

    pub fn validate_index_number(index_number: &str) -> Result<(), AppError> {
        let re = compiled(&INDEX_RE, r"^s[0-9]{4,6}$");
        if !re.is_match(index_number) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid index number (expected s followed by 4-6 digits)",
                index_number
            )));
        }
        Ok(())
    }

    pub fn validate_subject_code(code: &str) -> Result<(), AppError> {
        let re = compiled(&CODE_RE, r"^[A-Z]{2,5}[0-9]{0,3}$");
        if !re.is_match(code) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid subject code",
                code
            )));
        }
        Ok(())
    }

    pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
        if end < start {
            return Err(AppError::ValidationError(format!(
                "End date {} is before start date {}",
                end, start
            )));
        }
        Ok(())
    }

    pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), AppError> {
        if end <= start {
            return Err(AppError::ValidationError(format!(
                "End time {} must be after start time {}",
                end, start
            )));
        }
        Ok(())
    }

    pub fn validate_past_date(field: &str, date: NaiveDate) -> Result<(), AppError> {
        if date >= Utc::now().date_naive() {
            return Err(AppError::ValidationError(format!(
                "{} must be in the past",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_capacity(capacity: u32) -> Result<(), AppError> {
        if capacity == 0 {
            return Err(AppError::ValidationError(
                "Capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_ects(ects: u8) -> Result<(), AppError> {
        if !(1..=30).contains(&ects) {
            return Err(AppError::ValidationError(
                "ECTS must be between 1 and 30".to_string(),
            ));
        }
        Ok(())
    }
}
