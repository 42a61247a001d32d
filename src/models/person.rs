//! Student and teacher models.
//!
//! Both roles share an identifier, a display name, and a
//! [`Calendar`](super::Calendar). Students additionally carry their
//! outstanding bids in submission order; teachers carry the set of
//! session ids currently assigned to them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Calendar, Slot};

/// One unit of student interest in a session.
///
/// Immutable once placed. A student may hold several bids, including
/// duplicates for the same session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Bidding student.
    pub student_id: String,
    /// Target session.
    pub session_id: String,
}

/// A student who enrolls in sessions by bidding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Availability and preferences.
    pub calendar: Calendar,
    /// Outstanding bids, in submission order.
    pub bids: Vec<Bid>,
}

/// A teacher who can be assigned to sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Availability and preferences.
    pub calendar: Calendar,
    /// Ids of sessions currently assigned to this teacher.
    pub assigned_sessions: BTreeSet<String>,
}

impl Student {
    /// Creates a new student.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calendar: Calendar::new(),
            bids: Vec::new(),
        }
    }

    /// Sets the calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Appends a bid for a session.
    ///
    /// No uniqueness or capacity check; the target session is not verified
    /// to exist. Unresolvable bids are skipped at resolution time.
    pub fn place_bid(&mut self, session_id: impl Into<String>) {
        self.bids.push(Bid {
            student_id: self.id.clone(),
            session_id: session_id.into(),
        });
    }

    /// Number of outstanding bids.
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }
}

impl Teacher {
    /// Creates a new teacher.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calendar: Calendar::new(),
            assigned_sessions: BTreeSet::new(),
        }
    }

    /// Sets the calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Whether the teacher can cover a slot.
    pub fn is_available(&self, slot: Slot) -> bool {
        self.calendar.is_available(slot)
    }

    /// Preference weight for a slot (0.0 if none recorded).
    pub fn preference(&self, slot: Slot) -> f64 {
        self.calendar.preference(slot)
    }
}
