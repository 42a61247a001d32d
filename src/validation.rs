//! Directory integrity checks.
//!
//! The add operations already reject duplicate ids, but a `Directory` can
//! also materialize from deserialized data, which bypasses them. This
//! audit detects:
//! - Duplicate IDs
//! - Dangling references (assigned teacher, assigned session, enrolled
//!   student ids that don't resolve)
//! - Stale assignment back-references (session and teacher disagree)
//! - Teachers assigned outside their availability
//! - Students enrolled in more than one session

use crate::directory::Directory;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A reference points at an entity that doesn't exist.
    DanglingReference,
    /// A session and a teacher disagree about their binding.
    StaleAssignment,
    /// A teacher is assigned to a slot their calendar doesn't cover.
    UnavailableTeacher,
    /// A student is enrolled in more than one session.
    MultipleEnrollment,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audits a directory for structural integrity.
///
/// Checks:
/// 1. No duplicate student/teacher/session IDs
/// 2. Every `Session::teacher` resolves, holds the matching back-reference,
///    and is available at the session's slot
/// 3. Every `Teacher::assigned_sessions` entry resolves and points back
/// 4. Every enrolled student id resolves
/// 5. No student is enrolled in more than one session
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_directory(directory: &Directory) -> ValidationResult {
    let mut errors = Vec::new();

    let mut student_ids = HashSet::new();
    for s in directory.students() {
        if !student_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student ID: {}", s.id),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for t in directory.teachers() {
        if !teacher_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }
    }

    let mut session_ids = HashSet::new();
    for s in directory.sessions() {
        if !session_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate session ID: {}", s.id),
            ));
        }
    }

    // Session → teacher bindings
    for session in directory.sessions() {
        let Some(teacher_id) = session.teacher.as_deref() else {
            continue;
        };
        let Some(teacher) = directory.teacher(teacher_id) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Session '{}' assigned to unknown teacher '{teacher_id}'",
                    session.id
                ),
            ));
            continue;
        };
        if !teacher.assigned_sessions.contains(&session.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::StaleAssignment,
                format!(
                    "Session '{}' assigned to '{teacher_id}' but missing from their assigned set",
                    session.id
                ),
            ));
        }
        if !teacher.is_available(session.slot()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnavailableTeacher,
                format!(
                    "Teacher '{teacher_id}' assigned to session '{}' at {} {}:00 outside their availability",
                    session.id, session.date, session.hour
                ),
            ));
        }
    }

    // Teacher → session back-references
    for teacher in directory.teachers() {
        for session_id in &teacher.assigned_sessions {
            let Some(session) = directory.session(session_id) else {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "Teacher '{}' lists unknown session '{session_id}'",
                        teacher.id
                    ),
                ));
                continue;
            };
            if session.teacher.as_deref() != Some(teacher.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::StaleAssignment,
                    format!(
                        "Teacher '{}' lists session '{session_id}' which is not assigned to them",
                        teacher.id
                    ),
                ));
            }
        }
    }

    // Enrollment references and single-enrollment invariant
    let mut memberships: HashMap<&str, Vec<&str>> = HashMap::new();
    for session in directory.sessions() {
        for student_id in &session.enrolled {
            if !student_ids.contains(student_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "Session '{}' enrolls unknown student '{student_id}'",
                        session.id
                    ),
                ));
            }
            memberships
                .entry(student_id.as_str())
                .or_default()
                .push(session.id.as_str());
        }
    }
    for (student_id, sessions) in &memberships {
        if sessions.len() > 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::MultipleEnrollment,
                format!(
                    "Student '{student_id}' enrolled in {} sessions: {}",
                    sessions.len(),
                    sessions.join(", ")
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssignmentEngine;
    use crate::models::{Calendar, Session, Student, Teacher};
    use crate::roster;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn staffed_directory() -> Directory {
        let day = date(2024, 5, 1);
        let mut dir = Directory::new();
        dir.add_student(Student::new("s1", "Ada")).unwrap();
        dir.add_teacher(
            Teacher::new("t1", "Grace").with_calendar(Calendar::new().with_availability(day, [9])),
        )
        .unwrap();
        dir.add_session(Session::new("math", "Math", day, 9)).unwrap();
        AssignmentEngine::new().assign_all(&mut dir);
        roster::place_bid(&mut dir, "s1", "math").unwrap();
        roster::resolve_bids(&mut dir);
        dir
    }

    #[test]
    fn test_valid_after_engine_operations() {
        let dir = staffed_directory();
        assert!(validate_directory(&dir).is_ok());
    }

    #[test]
    fn test_empty_directory_is_valid() {
        assert!(validate_directory(&Directory::new()).is_ok());
    }

    #[test]
    fn test_dangling_teacher_reference() {
        let mut dir = staffed_directory();
        dir.session_mut("math").unwrap().teacher = Some("ghost".into());

        let errors = validate_directory(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingReference
                && e.message.contains("ghost")));
    }

    #[test]
    fn test_stale_assignment_both_directions() {
        let mut dir = staffed_directory();
        // Session points at t1 but t1 no longer lists it
        dir.teacher_mut("t1").unwrap().assigned_sessions.clear();

        let errors = validate_directory(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::StaleAssignment));

        // Teacher lists a session that was reassigned elsewhere
        let mut dir = staffed_directory();
        dir.session_mut("math").unwrap().teacher = None;

        let errors = validate_directory(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::StaleAssignment));
    }

    #[test]
    fn test_unavailable_teacher_detected() {
        let mut dir = staffed_directory();
        // Availability withdrawn after assignment; the audit flags it
        dir.teacher_mut("t1")
            .unwrap()
            .calendar
            .remove_available(date(2024, 5, 1), 9);

        let errors = validate_directory(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnavailableTeacher));
    }

    #[test]
    fn test_unknown_enrolled_student() {
        let mut dir = staffed_directory();
        dir.session_mut("math").unwrap().enroll("nobody");

        let errors = validate_directory(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingReference
                && e.message.contains("nobody")));
    }

    #[test]
    fn test_multiple_enrollment_detected() {
        let day = date(2024, 5, 1);
        let mut dir = Directory::new();
        dir.add_student(Student::new("s1", "Ada")).unwrap();
        dir.add_session(Session::new("math", "Math", day, 9)).unwrap();
        dir.add_session(Session::new("art", "Art", day, 14)).unwrap();
        // Bid resolution alone can produce this state
        roster::place_bid(&mut dir, "s1", "math").unwrap();
        roster::place_bid(&mut dir, "s1", "art").unwrap();
        roster::resolve_bids(&mut dir);

        let errors = validate_directory(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MultipleEnrollment));

        // A transfer restores the invariant
        roster::transfer_student(&mut dir, "s1", "math").unwrap();
        assert!(validate_directory(&dir).is_ok());
    }
}
