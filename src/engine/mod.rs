//! Teacher assignment engine.
//!
//! Matches sessions to teachers under availability and preference
//! constraints, and reassigns sessions away from a teacher who calls out.
//!
//! # Selection Rule
//!
//! For a session's slot, candidates are the teachers whose calendar marks
//! the slot available. Among candidates the engine picks the maximum
//! preference weight (missing weights score 0.0); ties fall to directory
//! insertion order, so results are reproducible for a given directory.
//!
//! # Usage
//!
//! ```
//! use u_roster::engine::{AssignmentEngine, AssignmentScope};
//! use u_roster::directory::Directory;
//!
//! let engine = AssignmentEngine::new().with_scope(AssignmentScope::UnassignedOnly);
//! let mut directory = Directory::new();
//! let report = engine.assign_all(&mut directory);
//! assert!(report.assigned.is_empty());
//! ```
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod assign;
mod callout;

pub use assign::{Assignment, AssignmentEngine, AssignmentReport, AssignmentScope};
pub use callout::{CallOutOutcome, CallOutResolution};

use crate::directory::Directory;
use crate::models::{Slot, Teacher};

/// Best candidate for a slot: available, maximum preference, first wins ties.
pub(crate) fn best_available<'a>(
    teachers: &'a [Teacher],
    slot: Slot,
    exclude: Option<&str>,
) -> Option<&'a Teacher> {
    let mut best: Option<(&Teacher, f64)> = None;
    for teacher in teachers {
        if exclude.is_some_and(|id| id == teacher.id) {
            continue;
        }
        if !teacher.is_available(slot) {
            continue;
        }
        let weight = teacher.preference(slot);
        // Strict improvement only, so the earliest-inserted teacher wins ties
        if best.map_or(true, |(_, top)| weight > top) {
            best = Some((teacher, weight));
        }
    }
    best.map(|(teacher, _)| teacher)
}

/// Points a session at a teacher and keeps back-references consistent.
///
/// Removes the session from `previous`'s assigned set (when different from
/// the new teacher), then records the binding on both sides.
pub(crate) fn bind_teacher(
    directory: &mut Directory,
    session_id: &str,
    teacher_id: &str,
    previous: Option<&str>,
) {
    if let Some(prev) = previous {
        if prev != teacher_id {
            if let Some(teacher) = directory.teacher_mut(prev) {
                teacher.assigned_sessions.remove(session_id);
            }
        }
    }
    if let Some(session) = directory.session_mut(session_id) {
        session.teacher = Some(teacher_id.to_string());
    }
    if let Some(teacher) = directory.teacher_mut(teacher_id) {
        teacher.assigned_sessions.insert(session_id.to_string());
    }
}
