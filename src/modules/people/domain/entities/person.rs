/// Attributes every person kind carries, plus the trait that exposes them.
use super::super::value_objects::PersonRef;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl PersonDetails {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            birth_date,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Field-level checks shared by every person kind
    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_name("First name", &self.first_name, 50)?;
        Validator::validate_name("Last name", &self.last_name, 80)?;
        Validator::validate_email(&self.email)?;
        Validator::validate_phone(&self.phone)?;
        Validator::validate_past_date("Birth date", self.birth_date)?;
        Ok(())
    }
}

/// Common view over students, free listeners, teachers and admins
pub trait Person {
    fn details(&self) -> &PersonDetails;

    fn details_mut(&mut self) -> &mut PersonDetails;

    fn person_ref(&self) -> PersonRef;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PersonDetails {
        PersonDetails::new(
            "Anna",
            "Nowak",
            "anna.nowak@uni.edu.pl",
            "+48 600 100 200",
            NaiveDate::from_ymd_opt(2001, 4, 12).unwrap(),
        )
    }

    #[test]
    fn valid_details_pass() {
        assert!(details().validate().is_ok());
        assert_eq!(details().full_name(), "Anna Nowak");
    }

    #[test]
    fn each_field_is_checked() {
        let mut bad_email = details();
        bad_email.email = "anna".to_string();
        assert!(bad_email.validate().is_err());

        let mut bad_phone = details();
        bad_phone.phone = "12".to_string();
        assert!(bad_phone.validate().is_err());

        let mut future_birth = details();
        future_birth.birth_date = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        assert!(future_birth.validate().is_err());
    }
}
