//! Enrollment operations: bid placement, bid resolution, and student
//! transfer.
//!
//! Bid resolution is a bulk operation that never errors; bids whose target
//! session does not exist are skipped. Transfers are the only operation
//! that enforces single enrollment — resolution can place a student in
//! several sessions if they bid on more than one.

use tracing::debug;

use crate::directory::Directory;
use crate::error::{Result, RosterError};

/// Records a student's interest in a session.
///
/// Appends to the student's bid list. The target session is deliberately
/// not verified; a bid that never resolves is skipped by
/// [`resolve_bids`].
///
/// # Errors
/// [`RosterError::UnknownStudent`] if the student is not in the directory.
pub fn place_bid(directory: &mut Directory, student_id: &str, session_id: &str) -> Result<()> {
    let Some(student) = directory.student_mut(student_id) else {
        return Err(RosterError::UnknownStudent(student_id.to_string()));
    };
    student.place_bid(session_id);
    debug!(student_id, session_id, "bid placed");
    Ok(())
}

/// Resolves every outstanding bid into enrollment.
///
/// Students are visited in directory insertion order, bids in submission
/// order. Enrollment is set-semantics, so duplicate bids and repeated
/// resolution runs are idempotent. Bid lists are retained; they are a
/// record of interest, not a queue.
pub fn resolve_bids(directory: &mut Directory) {
    let bids: Vec<(String, String)> = directory
        .students()
        .iter()
        .flat_map(|s| s.bids.iter())
        .map(|b| (b.student_id.clone(), b.session_id.clone()))
        .collect();

    let mut enrolled = 0usize;
    let mut skipped = 0usize;
    for (student_id, session_id) in bids {
        match directory.session_mut(&session_id) {
            Some(session) => {
                if session.enroll(student_id) {
                    enrolled += 1;
                }
            }
            None => skipped += 1,
        }
    }
    debug!(enrolled, skipped, "bids resolved");
}

/// Moves a student to a session, leaving them enrolled nowhere else.
///
/// Withdraws the student from every session, then enrolls them in the
/// target. After this operation the student appears in exactly one
/// session's roster.
///
/// # Errors
/// [`RosterError::InvalidReference`] if the student or the target session
/// is missing; no roster is mutated in that case.
pub fn transfer_student(
    directory: &mut Directory,
    student_id: &str,
    new_session_id: &str,
) -> Result<()> {
    if directory.student(student_id).is_none() || directory.session(new_session_id).is_none() {
        return Err(RosterError::InvalidReference {
            student_id: student_id.to_string(),
            session_id: new_session_id.to_string(),
        });
    }

    for session in directory.sessions_mut() {
        session.withdraw(student_id);
    }
    if let Some(target) = directory.session_mut(new_session_id) {
        target.enroll(student_id);
    }
    debug!(student_id, new_session_id, "student transferred");
    Ok(())
}
