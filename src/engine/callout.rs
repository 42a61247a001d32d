//! Teacher call-out handling.
//!
//! When a teacher becomes unavailable at short notice, every session
//! assigned to them gets a substitute search. Substitutes are selected by
//! the same rule as initial assignment, with the absent teacher excluded
//! from candidacy regardless of what their calendar says.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{best_available, bind_teacher, AssignmentEngine};
use crate::directory::Directory;
use crate::error::{Result, RosterError};

/// Per-session result of a call-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutOutcome {
    /// Affected session id.
    pub session_id: String,
    /// How the session was resolved.
    pub resolution: CallOutResolution,
}

/// How a call-out affected one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutResolution {
    /// The session was reassigned to the named substitute.
    Reassigned(String),
    /// No other teacher covers the slot; the session stays assigned to
    /// the absent teacher so the roster remains displayable.
    NoCoverage,
}

impl AssignmentEngine {
    /// Finds substitutes for every session assigned to an absent teacher.
    ///
    /// Sessions are processed in id order. A successful reassignment moves
    /// the session to the substitute and removes it from the absent
    /// teacher's assigned set; a session nobody can cover is reported as
    /// [`CallOutResolution::NoCoverage`] and left untouched.
    ///
    /// # Errors
    /// [`RosterError::UnknownTeacher`] if the teacher id does not resolve.
    pub fn handle_call_out(
        &self,
        directory: &mut Directory,
        teacher_id: &str,
    ) -> Result<Vec<CallOutOutcome>> {
        let Some(teacher) = directory.teacher(teacher_id) else {
            return Err(RosterError::UnknownTeacher(teacher_id.to_string()));
        };
        let affected: Vec<String> = teacher.assigned_sessions.iter().cloned().collect();

        let mut outcomes = Vec::with_capacity(affected.len());
        for session_id in affected {
            let Some(session) = directory.session(&session_id) else {
                continue;
            };
            let slot = session.slot();

            match best_available(directory.teachers(), slot, Some(teacher_id))
                .map(|t| t.id.clone())
            {
                Some(substitute_id) => {
                    bind_teacher(directory, &session_id, &substitute_id, Some(teacher_id));
                    debug!(
                        session = %session_id,
                        substitute = %substitute_id,
                        "session reassigned"
                    );
                    outcomes.push(CallOutOutcome {
                        session_id,
                        resolution: CallOutResolution::Reassigned(substitute_id),
                    });
                }
                None => {
                    warn!(session = %session_id, "no substitute available");
                    outcomes.push(CallOutOutcome {
                        session_id,
                        resolution: CallOutResolution::NoCoverage,
                    });
                }
            }
        }
        Ok(outcomes)
    }
}
