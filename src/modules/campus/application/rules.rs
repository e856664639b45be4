//! Attribute rules a record must satisfy whenever it is stored, whether it is
//! being created or edited.
use crate::modules::academic::domain::{
    Building, ClassRoom, Group, Lesson, Semester, Specialization, StudyProgram, Subject,
};
use crate::modules::campus::domain::CampusGraph;
use crate::modules::people::domain::{Admin, FreeListener, Person, PersonRef, Student, Teacher};
use crate::modules::relations::Entity;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

fn ensure_unique<'a, I>(mut others: I, candidate: &str, what: &str) -> AppResult<()>
where
    I: Iterator<Item = &'a str>,
{
    if others.any(|value| value.trim().eq_ignore_ascii_case(candidate.trim())) {
        return Err(AppError::AlreadyExists(format!(
            "{} '{}' already exists",
            what, candidate
        )));
    }
    Ok(())
}

/// Emails are unique across every kind of person
fn ensure_email_unused(graph: &CampusGraph, owner: PersonRef, email: &str) -> AppResult<()> {
    let taken_by = graph.people().into_iter().find(|person| {
        *person != owner
            && graph
                .person_details(person)
                .map(|details| details.email.eq_ignore_ascii_case(email))
                .unwrap_or(false)
    });
    match taken_by {
        Some(existing) => Err(AppError::AlreadyExists(format!(
            "Email '{}' is already used by {}",
            email, existing
        ))),
        None => Ok(()),
    }
}

pub trait RecordRules: Entity {
    /// Formats and ranges of the record's own fields
    fn check_fields(&self) -> AppResult<()>;

    /// Rules against the rest of the graph. The record itself, if already
    /// stored, never counts as a conflict.
    fn check_against(&self, _graph: &CampusGraph) -> AppResult<()> {
        Ok(())
    }

    fn check(&self, graph: &CampusGraph) -> AppResult<()> {
        self.check_fields()?;
        self.check_against(graph)
    }
}

impl RecordRules for Building {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_name("Building name", &self.name, 100)?;
        Validator::validate_name("Address", &self.address, 200)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.buildings().filter(|b| b.id() != self.id());
        ensure_unique(others.map(|b| b.name.as_str()), &self.name, "Building")
    }
}

impl RecordRules for ClassRoom {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_name("Room number", &self.number, 20)?;
        Validator::validate_capacity(self.capacity)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.class_rooms().filter(|r| r.id() != self.id());
        ensure_unique(others.map(|r| r.number.as_str()), &self.number, "Room")
    }
}

impl RecordRules for Lesson {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_time_range(self.start(), self.end())
    }
}

impl RecordRules for Group {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_name("Group name", &self.name, 50)?;
        Validator::validate_capacity(self.capacity)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.groups().filter(|g| g.id() != self.id());
        ensure_unique(others.map(|g| g.name.as_str()), &self.name, "Group")
    }
}

impl RecordRules for Semester {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_name("Semester name", &self.name, 50)?;
        Validator::validate_date_range(self.starts_on(), self.ends_on())
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.semesters().filter(|s| s.id() != self.id());
        ensure_unique(others.map(|s| s.name.as_str()), &self.name, "Semester")
    }
}

impl RecordRules for Subject {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_subject_code(&self.code)?;
        Validator::validate_name("Subject name", &self.name, 100)?;
        Validator::validate_ects(self.ects)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.subjects().filter(|s| s.id() != self.id());
        ensure_unique(others.map(|s| s.code.as_str()), &self.code, "Subject code")
    }
}

impl RecordRules for Specialization {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_name("Specialization name", &self.name, 100)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.specializations().filter(|s| s.id() != self.id());
        ensure_unique(others.map(|s| s.name.as_str()), &self.name, "Specialization")
    }
}

impl RecordRules for StudyProgram {
    fn check_fields(&self) -> AppResult<()> {
        Validator::validate_name("Study program name", &self.name, 100)?;
        if !(1..=12).contains(&self.semester_count) {
            return Err(AppError::ValidationError(format!(
                "A study program lasts 1 to 12 semesters, got {}",
                self.semester_count
            )));
        }
        Ok(())
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        let others = graph.study_programs().filter(|p| p.id() != self.id());
        ensure_unique(others.map(|p| p.name.as_str()), &self.name, "Study program")
    }
}

impl RecordRules for Student {
    fn check_fields(&self) -> AppResult<()> {
        self.details.validate()?;
        Validator::validate_index_number(&self.index_number)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        ensure_email_unused(graph, self.person_ref(), &self.details.email)?;
        let others = graph.students().filter(|s| s.id() != self.id());
        ensure_unique(
            others.map(|s| s.index_number.as_str()),
            &self.index_number,
            "Index number",
        )
    }
}

impl RecordRules for FreeListener {
    fn check_fields(&self) -> AppResult<()> {
        self.details.validate()
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        ensure_email_unused(graph, self.person_ref(), &self.details.email)
    }
}

impl RecordRules for Teacher {
    fn check_fields(&self) -> AppResult<()> {
        self.details.validate()?;
        match &self.academic_title {
            Some(title) => Validator::validate_name("Academic title", title, 30),
            None => Ok(()),
        }
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        ensure_email_unused(graph, self.person_ref(), &self.details.email)
    }
}

impl RecordRules for Admin {
    fn check_fields(&self) -> AppResult<()> {
        self.details.validate()?;
        Validator::validate_name("Role title", &self.role_title, 100)
    }

    fn check_against(&self, graph: &CampusGraph) -> AppResult<()> {
        ensure_email_unused(graph, self.person_ref(), &self.details.email)
    }
}
