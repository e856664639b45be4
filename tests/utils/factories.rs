/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use campus_lib::modules::academic::{Lesson, LessonKind};
use campus_lib::modules::people::PersonDetails;
use chrono::{NaiveDate, NaiveTime, Weekday};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub struct PersonFactory {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birth_date: NaiveDate,
}

impl Default for PersonFactory {
    fn default() -> Self {
        let tag = rand::random::<u32>() % 1_000_000;
        Self {
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: format!("jan.kowalski.{}@uni.edu.pl", tag),
            phone: format!("+48 600 {:06}", tag),
            birth_date: date(2000, 5, 17),
        }
    }
}

impl PersonFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = birth_date;
        self
    }

    pub fn build(self) -> PersonDetails {
        PersonDetails::new(
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.birth_date,
        )
    }
}

pub struct LessonFactory {
    kind: LessonKind,
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

impl Default for LessonFactory {
    fn default() -> Self {
        Self {
            kind: LessonKind::Lecture,
            weekday: Weekday::Mon,
            start: time(8, 15),
            end: time(9, 45),
        }
    }
}

impl LessonFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: LessonKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn on(mut self, weekday: Weekday) -> Self {
        self.weekday = weekday;
        self
    }

    pub fn at(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn build(self) -> Lesson {
        Lesson::new(self.kind, self.weekday, self.start, self.end).unwrap()
    }
}
