//! Directory: the aggregate root owning students, teachers, and sessions.
//!
//! Entities are stored in insertion order, which doubles as the
//! deterministic tie-break order for the assignment engine. Inserting a
//! duplicate id is rejected rather than silently overwriting the prior
//! entry. There is no removal operation; entities persist for the life of
//! the directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RosterError};
use crate::models::{RecurringTemplate, Session, Student, Teacher};

/// Canonical owner of all roster entities.
///
/// Cross-references between entities (`Session::teacher`,
/// `Teacher::assigned_sessions`) are id back-references for lookup only;
/// the directory is the sole owner.
///
/// Engine operations perform multi-step read-modify-write sequences over
/// this state. A directory shared across threads must sit behind a single
/// lock or single-writer actor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    sessions: Vec<Session>,
}

/// One line of a day listing, for display by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier.
    pub session_id: String,
    /// Session name.
    pub name: String,
    /// Scheduled hour (0–23).
    pub hour: u8,
    /// Assigned teacher's display name, if staffed.
    pub teacher_name: Option<String>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let teacher = self.teacher_name.as_deref().unwrap_or("TBD");
        write!(f, "{} (Teacher: {}) at {}:00", self.name, teacher, self.hour)
    }
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a student.
    ///
    /// # Errors
    /// [`RosterError::DuplicateId`] if a student with the same id exists.
    pub fn add_student(&mut self, student: Student) -> Result<()> {
        if self.student(&student.id).is_some() {
            return Err(RosterError::DuplicateId(student.id));
        }
        self.students.push(student);
        Ok(())
    }

    /// Adds a teacher.
    ///
    /// # Errors
    /// [`RosterError::DuplicateId`] if a teacher with the same id exists.
    pub fn add_teacher(&mut self, teacher: Teacher) -> Result<()> {
        if self.teacher(&teacher.id).is_some() {
            return Err(RosterError::DuplicateId(teacher.id));
        }
        self.teachers.push(teacher);
        Ok(())
    }

    /// Adds a session.
    ///
    /// # Errors
    /// [`RosterError::DuplicateId`] if a session with the same id exists.
    pub fn add_session(&mut self, session: Session) -> Result<()> {
        if self.session(&session.id).is_some() {
            return Err(RosterError::DuplicateId(session.id));
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Expands a recurring template and inserts every instance.
    ///
    /// Returns the minted instance ids in schedule order. If any minted id
    /// collides with an existing session, nothing is inserted.
    ///
    /// # Errors
    /// [`RosterError::DuplicateId`] on the first colliding instance id.
    pub fn add_recurring(&mut self, template: &RecurringTemplate) -> Result<Vec<String>> {
        let instances = template.expand();
        for instance in &instances {
            if self.session(&instance.id).is_some() {
                return Err(RosterError::DuplicateId(instance.id.clone()));
            }
        }
        let ids = instances.iter().map(|s| s.id.clone()).collect();
        self.sessions.extend(instances);
        Ok(ids)
    }

    /// Looks up a student by id.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Looks up a student by id, mutably.
    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Looks up a teacher by id, mutably.
    pub fn teacher_mut(&mut self, id: &str) -> Option<&mut Teacher> {
        self.teachers.iter_mut().find(|t| t.id == id)
    }

    /// Looks up a session by id.
    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Looks up a session by id, mutably.
    pub fn session_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// All students, in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All teachers, in insertion order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// All sessions, in insertion order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Mutable iteration over all sessions, in insertion order.
    pub fn sessions_mut(&mut self) -> impl Iterator<Item = &mut Session> + '_ {
        self.sessions.iter_mut()
    }

    /// Number of students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of teachers.
    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Sessions scheduled on a date, ordered by (hour, id).
    ///
    /// Unstaffed sessions render their teacher as `"TBD"` via
    /// [`SessionSummary`]'s `Display`.
    pub fn sessions_on(&self, date: NaiveDate) -> Vec<SessionSummary> {
        let mut listing: Vec<SessionSummary> = self
            .sessions
            .iter()
            .filter(|s| s.date == date)
            .map(|s| SessionSummary {
                session_id: s.id.clone(),
                name: s.name.clone(),
                hour: s.hour,
                teacher_name: s
                    .teacher
                    .as_deref()
                    .and_then(|id| self.teacher(id))
                    .map(|t| t.name.clone()),
            })
            .collect();
        listing.sort_by(|a, b| (a.hour, &a.session_id).cmp(&(b.hour, &b.session_id)));
        listing
    }
}
