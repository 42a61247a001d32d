//! Bulk teacher assignment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{best_available, bind_teacher};
use crate::directory::Directory;

/// Which sessions an [`assign_all`](AssignmentEngine::assign_all) run
/// considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssignmentScope {
    /// Only sessions without a teacher; existing assignments are kept.
    #[default]
    UnassignedOnly,
    /// Every session; already-staffed sessions are re-solved and a
    /// displaced teacher's back-reference is pruned.
    All,
}

/// One session-to-teacher binding produced by an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned session id.
    pub session_id: String,
    /// Assigned teacher id.
    pub teacher_id: String,
}

/// Result of an assignment run.
///
/// Sessions with no available teacher are listed in `unassigned` and left
/// unstaffed; a run never errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentReport {
    /// Bindings made by this run, in session order.
    pub assigned: Vec<Assignment>,
    /// Sessions no teacher could cover.
    pub unassigned: Vec<String>,
}

impl AssignmentReport {
    /// Whether every in-scope session found a teacher.
    pub fn is_fully_staffed(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Finds the binding for a session, if one was made.
    pub fn assignment_for(&self, session_id: &str) -> Option<&Assignment> {
        self.assigned.iter().find(|a| a.session_id == session_id)
    }
}

/// Availability-gated, preference-maximizing teacher assignment.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::directory::Directory;
/// use u_roster::engine::AssignmentEngine;
/// use u_roster::models::{Calendar, Session, Teacher};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let mut directory = Directory::new();
/// directory
///     .add_teacher(Teacher::new("t1", "Grace").with_calendar(
///         Calendar::new().with_availability(day, [9]),
///     ))
///     .unwrap();
/// directory
///     .add_session(Session::new("math", "Math", day, 9))
///     .unwrap();
///
/// let report = AssignmentEngine::new().assign_all(&mut directory);
/// assert_eq!(report.assigned.len(), 1);
/// assert_eq!(directory.session("math").unwrap().teacher.as_deref(), Some("t1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    scope: AssignmentScope,
}

impl AssignmentEngine {
    /// Creates an engine that assigns only unstaffed sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the assignment scope.
    pub fn with_scope(mut self, scope: AssignmentScope) -> Self {
        self.scope = scope;
        self
    }

    /// Assigns a teacher to every in-scope session.
    ///
    /// Sessions are visited in directory insertion order. For each, the
    /// best available teacher (maximum preference for the slot, ties to
    /// the earliest-inserted teacher) is bound; sessions with no available
    /// teacher are reported and skipped.
    pub fn assign_all(&self, directory: &mut Directory) -> AssignmentReport {
        let targets: Vec<String> = directory
            .sessions()
            .iter()
            .filter(|s| self.scope == AssignmentScope::All || !s.is_staffed())
            .map(|s| s.id.clone())
            .collect();

        let mut report = AssignmentReport::default();
        for session_id in targets {
            let Some(session) = directory.session(&session_id) else {
                continue;
            };
            let slot = session.slot();
            let previous = session.teacher.clone();

            match best_available(directory.teachers(), slot, None).map(|t| t.id.clone()) {
                Some(teacher_id) => {
                    bind_teacher(directory, &session_id, &teacher_id, previous.as_deref());
                    debug!(session = %session_id, teacher = %teacher_id, "session assigned");
                    report.assigned.push(Assignment {
                        session_id,
                        teacher_id,
                    });
                }
                None => {
                    debug!(session = %session_id, "no available teacher");
                    report.unassigned.push(session_id);
                }
            }
        }
        report
    }
}
