//! Operation errors.
//!
//! Every error is recoverable and reported to the caller as a result value;
//! no engine operation terminates the process. Batch operations
//! (`assign_all`, `resolve_bids`) never error — they degrade by leaving
//! sessions unstaffed or bids unresolved.

use thiserror::Error;

/// Errors surfaced by roster operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A teacher id did not resolve in the directory.
    #[error("unknown teacher '{0}'")]
    UnknownTeacher(String),

    /// A student id did not resolve in the directory.
    #[error("unknown student '{0}'")]
    UnknownStudent(String),

    /// A session id did not resolve in the directory.
    #[error("unknown session '{0}'")]
    UnknownSession(String),

    /// A transfer referenced a student or session that does not exist.
    /// No mutation is performed.
    #[error("invalid reference: student '{student_id}' or session '{session_id}' not found")]
    InvalidReference {
        student_id: String,
        session_id: String,
    },

    /// An insert would reuse an id already present in the directory.
    #[error("duplicate id '{0}'")]
    DuplicateId(String),
}

pub type Result<T, E = RosterError> = std::result::Result<T, E>;
