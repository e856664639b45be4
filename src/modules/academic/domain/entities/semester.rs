use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{LessonId, SemesterId};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    id: SemesterId,
    pub name: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    #[serde(default)]
    pub(crate) lessons: ManyEndpoint<LessonId>,
}

impl Semester {
    pub fn new(name: impl Into<String>, starts_on: NaiveDate, ends_on: NaiveDate) -> AppResult<Self> {
        Validator::validate_date_range(starts_on, ends_on)?;
        Ok(Self {
            id: SemesterId::new(),
            name: name.into(),
            starts_on,
            ends_on,
            lessons: ManyEndpoint::new(),
        })
    }

    pub fn id(&self) -> SemesterId {
        self.id
    }

    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    pub fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        (self.starts_on..=self.ends_on).contains(&date)
    }

    pub fn reschedule(&mut self, starts_on: NaiveDate, ends_on: NaiveDate) -> AppResult<()> {
        Validator::validate_date_range(starts_on, ends_on)?;
        self.starts_on = starts_on;
        self.ends_on = ends_on;
        Ok(())
    }

    pub fn lessons(&self) -> Vec<LessonId> {
        self.lessons.snapshot()
    }
}

impl Entity for Semester {
    type Id = SemesterId;
    const KIND: &'static str = "semester";

    fn id(&self) -> SemesterId {
        self.id
    }

    fn entity_ref(id: SemesterId) -> EntityRef {
        EntityRef::Semester(id)
    }

    fn edges(&self) -> Vec<Edge> {
        self.lessons
            .iter()
            .map(|lesson| {
                Edge::new(
                    RelationKind::LessonSemesters,
                    EntityRef::Lesson(*lesson),
                    EntityRef::Semester(self.id),
                )
            })
            .collect()
    }

    fn has_links(&self) -> bool {
        !self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(Semester::new("Winter", date(2025, 2, 1), date(2024, 10, 1)).is_err());
    }

    #[test]
    fn contains_boundaries() {
        let semester = Semester::new("Winter 2024", date(2024, 10, 1), date(2025, 2, 15)).unwrap();
        assert!(semester.contains_date(date(2024, 10, 1)));
        assert!(semester.contains_date(date(2025, 2, 15)));
        assert!(!semester.contains_date(date(2025, 2, 16)));
    }

    #[test]
    fn failed_reschedule_keeps_dates() {
        let mut semester = Semester::new("Summer", date(2025, 2, 20), date(2025, 6, 30)).unwrap();
        assert!(semester.reschedule(date(2025, 7, 1), date(2025, 3, 1)).is_err());
        assert_eq!(semester.starts_on(), date(2025, 2, 20));
    }
}
