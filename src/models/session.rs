//! Session and recurring template models.
//!
//! A session is one concrete scheduled class occurrence. A recurring
//! template expands deterministically into a bounded run of sessions with
//! date-stepped schedules.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Slot;

/// Number of instances a template expands into unless overridden.
pub const DEFAULT_INSTANCE_COUNT: usize = 10;

/// One concrete scheduled class occurrence.
///
/// Enrollment is a true set: a student is a member at most once no matter
/// how many bids they placed. The assigned teacher, if present, was
/// available at the session's slot at assignment time; availability is not
/// re-validated if the teacher's calendar changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Scheduled date.
    pub date: NaiveDate,
    /// Scheduled hour (0–23).
    pub hour: u8,
    /// Enrolled student ids.
    pub enrolled: BTreeSet<String>,
    /// Assigned teacher id, if staffed.
    pub teacher: Option<String>,
}

impl Session {
    /// Creates a new unstaffed, empty session.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
        hour: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            hour,
            enrolled: BTreeSet::new(),
            teacher: None,
        }
    }

    /// The session's teaching slot.
    #[inline]
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.hour)
    }

    /// Enrolls a student. Returns `false` if already enrolled.
    pub fn enroll(&mut self, student_id: impl Into<String>) -> bool {
        self.enrolled.insert(student_id.into())
    }

    /// Withdraws a student. Returns `false` if not enrolled.
    pub fn withdraw(&mut self, student_id: &str) -> bool {
        self.enrolled.remove(student_id)
    }

    /// Whether a student is enrolled.
    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.enrolled.contains(student_id)
    }

    /// Whether a teacher is assigned.
    pub fn is_staffed(&self) -> bool {
        self.teacher.is_some()
    }
}

/// How often a recurring class repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One session per day.
    Daily,
    /// One session per week.
    Weekly,
}

impl Frequency {
    /// Days between consecutive instances.
    #[inline]
    pub fn step_days(self) -> u64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
        }
    }
}

/// A pattern that expands into a bounded run of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    /// Template identifier; expanded instances mint `"{id}#{k}"`.
    pub id: String,
    /// Name shared by every instance.
    pub name: String,
    /// Date of the first instance.
    pub start_date: NaiveDate,
    /// Hour shared by every instance (0–23).
    pub hour: u8,
    /// Repeat interval.
    pub frequency: Frequency,
    /// Number of instances to generate.
    pub count: usize,
}

impl RecurringTemplate {
    /// Creates a template generating [`DEFAULT_INSTANCE_COUNT`] instances.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        hour: u8,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date,
            hour,
            frequency,
            count: DEFAULT_INSTANCE_COUNT,
        }
    }

    /// Overrides the instance count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Expands into `count` sessions at `start_date + k * step`.
    ///
    /// Instance `k` gets id `"{template_id}#{k}"` so every instance can be
    /// stored under its own directory key. Expansion stops early only if a
    /// stepped date would overflow the calendar range.
    pub fn expand(&self) -> Vec<Session> {
        let step = self.frequency.step_days();
        let mut sessions = Vec::with_capacity(self.count);
        for k in 0..self.count {
            let Some(date) = self.start_date.checked_add_days(Days::new(step * k as u64)) else {
                break;
            };
            sessions.push(Session::new(
                format!("{}#{k}", self.id),
                self.name.clone(),
                date,
                self.hour,
            ));
        }
        sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_session_slot() {
        let s = Session::new("math#0", "Math", date(2024, 5, 1), 9);
        assert_eq!(s.slot(), Slot::new(date(2024, 5, 1), 9));
        assert!(!s.is_staffed());
        assert!(s.enrolled.is_empty());
    }

    #[test]
    fn test_enroll_is_set_semantics() {
        let mut s = Session::new("math#0", "Math", date(2024, 5, 1), 9);

        assert!(s.enroll("s1"));
        assert!(!s.enroll("s1")); // second enroll is a no-op
        assert!(s.enroll("s2"));

        assert_eq!(s.enrolled.len(), 2);
        assert!(s.is_enrolled("s1"));
        assert!(s.withdraw("s1"));
        assert!(!s.withdraw("s1"));
        assert!(!s.is_enrolled("s1"));
    }

    #[test]
    fn test_weekly_expansion() {
        let template = RecurringTemplate::new(
            "yoga",
            "Morning Yoga",
            date(2024, 5, 1),
            9,
            Frequency::Weekly,
        );
        let sessions = template.expand();

        assert_eq!(sessions.len(), 10);
        assert_eq!(sessions[0].id, "yoga#0");
        assert_eq!(sessions[0].date, date(2024, 5, 1));
        assert_eq!(sessions[1].date, date(2024, 5, 8));
        assert_eq!(sessions[9].id, "yoga#9");
        assert_eq!(sessions[9].date, date(2024, 7, 3)); // start + 63 days
        assert!(sessions.iter().all(|s| s.hour == 9));
        assert!(sessions.iter().all(|s| s.name == "Morning Yoga"));
    }

    #[test]
    fn test_daily_expansion_steps_one_day() {
        let template =
            RecurringTemplate::new("lab", "Lab", date(2024, 2, 27), 14, Frequency::Daily);
        let sessions = template.expand();

        assert_eq!(sessions.len(), 10);
        assert_eq!(sessions[1].date, date(2024, 2, 28));
        assert_eq!(sessions[2].date, date(2024, 2, 29)); // leap day
        assert_eq!(sessions[3].date, date(2024, 3, 1));
    }

    #[test]
    fn test_expansion_count_override() {
        let template = RecurringTemplate::new("x", "X", date(2024, 5, 1), 8, Frequency::Daily)
            .with_count(3);
        assert_eq!(template.expand().len(), 3);
    }

    #[test]
    fn test_frequency_from_json() {
        let f: Frequency = serde_json::from_str(r#""weekly""#).unwrap();
        assert_eq!(f, Frequency::Weekly);
        assert_eq!(Frequency::Daily.step_days(), 1);
        assert_eq!(Frequency::Weekly.step_days(), 7);
    }
}
