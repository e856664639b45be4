use crate::modules::academic::domain::value_objects::LessonKind;
use crate::modules::people::domain::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind, SingleEndpoint};
use crate::shared::domain::{ClassRoomId, GroupId, LessonId, SemesterId, SubjectId, TeacherId};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A recurring weekly class.
///
/// Subject, group and teacher are single-valued and replaceable; rooms and
/// semesters accumulate because one lesson can move between rooms and run in
/// several semesters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    id: LessonId,
    kind: LessonKind,
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    #[serde(default)]
    pub(crate) subject: SingleEndpoint<SubjectId>,
    #[serde(default)]
    pub(crate) group: SingleEndpoint<GroupId>,
    #[serde(default)]
    pub(crate) teacher: SingleEndpoint<TeacherId>,
    #[serde(default)]
    pub(crate) class_rooms: ManyEndpoint<ClassRoomId>,
    #[serde(default)]
    pub(crate) semesters: ManyEndpoint<SemesterId>,
}

impl Lesson {
    pub fn new(kind: LessonKind, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        Validator::validate_time_range(start, end)?;
        Ok(Self {
            id: LessonId::new(),
            kind,
            weekday,
            start,
            end,
            subject: SingleEndpoint::new(),
            group: SingleEndpoint::new(),
            teacher: SingleEndpoint::new(),
            class_rooms: ManyEndpoint::new(),
            semesters: ManyEndpoint::new(),
        })
    }

    pub fn id(&self) -> LessonId {
        self.id
    }

    pub fn kind(&self) -> LessonKind {
        self.kind
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether this lesson and `other` occupy overlapping time on the same day
    pub fn overlaps(&self, other: &Lesson) -> bool {
        self.weekday == other.weekday && self.start < other.end && other.start < self.end
    }

    pub fn reschedule(&mut self, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> AppResult<()> {
        Validator::validate_time_range(start, end)?;
        self.weekday = weekday;
        self.start = start;
        self.end = end;
        Ok(())
    }

    pub fn subject(&self) -> Option<SubjectId> {
        self.subject.get()
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group.get()
    }

    pub fn teacher(&self) -> Option<TeacherId> {
        self.teacher.get()
    }

    pub fn class_rooms(&self) -> Vec<ClassRoomId> {
        self.class_rooms.snapshot()
    }

    pub fn semesters(&self) -> Vec<SemesterId> {
        self.semesters.snapshot()
    }
}

impl Entity for Lesson {
    type Id = LessonId;
    const KIND: &'static str = "lesson";

    fn id(&self) -> LessonId {
        self.id
    }

    fn entity_ref(id: LessonId) -> EntityRef {
        EntityRef::Lesson(id)
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Lesson(self.id);
        let mut edges = Vec::new();
        if let Some(subject) = self.subject.get() {
            edges.push(Edge::new(RelationKind::LessonSubject, me, EntityRef::Subject(subject)));
        }
        if let Some(group) = self.group.get() {
            edges.push(Edge::new(RelationKind::LessonGroup, me, EntityRef::Group(group)));
        }
        if let Some(teacher) = self.teacher.get() {
            edges.push(Edge::new(
                RelationKind::LessonTeacher,
                me,
                EntityRef::Person(PersonRef::Teacher(teacher)),
            ));
        }
        for room in self.class_rooms.iter() {
            edges.push(Edge::new(RelationKind::ClassRoomLessons, EntityRef::ClassRoom(*room), me));
        }
        for semester in self.semesters.iter() {
            edges.push(Edge::new(RelationKind::LessonSemesters, me, EntityRef::Semester(*semester)));
        }
        edges
    }

    fn has_links(&self) -> bool {
        self.subject.is_set()
            || self.group.is_set()
            || self.teacher.is_set()
            || !self.class_rooms.is_empty()
            || !self.semesters.is_empty()
    }
}
