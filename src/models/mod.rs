//! Roster domain models.
//!
//! Provides the core data types for representing people, sessions, and
//! their calendars. Mutation across entities (enrollment resolution,
//! teacher assignment, transfers) lives in the operation modules
//! (`roster`, `engine`); the models only maintain their own local
//! invariants, such as set-semantics enrollment.

mod calendar;
mod person;
mod session;

pub use calendar::{Calendar, Slot};
pub use person::{Bid, Student, Teacher};
pub use session::{Frequency, RecurringTemplate, Session, DEFAULT_INSTANCE_COUNT};
