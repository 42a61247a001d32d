//! Calendar and teaching slot models.
//!
//! Defines per-person availability patterns (which hours of which days a
//! person can be scheduled) and preference weights (how much a person
//! wants a given slot).
//!
//! # Time Model
//! Classes occupy whole-hour slots: a calendar date plus an hour 0–23.
//! Hour values are validated at the boundary that parses user input;
//! the models store them as plain `u8`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One teaching slot: a calendar date plus an hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Hour of day (0–23).
    pub hour: u8,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(date: NaiveDate, hour: u8) -> Self {
        Self { date, hour }
    }
}

/// Per-person availability and preference calendar.
///
/// Availability maps a date to the set of hours the person can be
/// scheduled. Preferences map a date to weighted hours; a slot with no
/// recorded weight scores 0.0. A slot can carry a preference without
/// being available — preference never implies availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calendar {
    /// Date → hours the person is available.
    available: HashMap<NaiveDate, BTreeSet<u8>>,
    /// Date → hour → preference weight.
    preferences: HashMap<NaiveDate, HashMap<u8, f64>>,
}

impl Calendar {
    /// Creates an empty calendar (available nowhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the available hours for a date.
    pub fn set_available(&mut self, date: NaiveDate, hours: impl IntoIterator<Item = u8>) {
        self.available.insert(date, hours.into_iter().collect());
    }

    /// Marks a single slot as available.
    pub fn add_available(&mut self, date: NaiveDate, hour: u8) {
        self.available.entry(date).or_default().insert(hour);
    }

    /// Withdraws availability for a single slot.
    ///
    /// Returns `true` if the slot was previously available.
    pub fn remove_available(&mut self, date: NaiveDate, hour: u8) -> bool {
        match self.available.get_mut(&date) {
            Some(hours) => hours.remove(&hour),
            None => false,
        }
    }

    /// Sets the preference weight for a slot.
    pub fn set_preference(&mut self, date: NaiveDate, hour: u8, weight: f64) {
        self.preferences.entry(date).or_default().insert(hour, weight);
    }

    /// Builder form of [`set_available`](Self::set_available).
    pub fn with_availability(mut self, date: NaiveDate, hours: impl IntoIterator<Item = u8>) -> Self {
        self.set_available(date, hours);
        self
    }

    /// Builder form of [`set_preference`](Self::set_preference).
    pub fn with_preference(mut self, date: NaiveDate, hour: u8, weight: f64) -> Self {
        self.set_preference(date, hour, weight);
        self
    }

    /// Whether the person is available at a slot.
    pub fn is_available(&self, slot: Slot) -> bool {
        self.available
            .get(&slot.date)
            .is_some_and(|hours| hours.contains(&slot.hour))
    }

    /// Preference weight for a slot (0.0 if none recorded).
    pub fn preference(&self, slot: Slot) -> f64 {
        self.preferences
            .get(&slot.date)
            .and_then(|hours| hours.get(&slot.hour))
            .copied()
            .unwrap_or(0.0)
    }

    /// Available hours on a date, in ascending order.
    pub fn available_hours(&self, date: NaiveDate) -> Vec<u8> {
        self.available
            .get(&date)
            .map(|hours| hours.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether the calendar records no availability at all.
    pub fn is_empty(&self) -> bool {
        self.available.values().all(BTreeSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slot_equality() {
        let a = Slot::new(date(2024, 5, 1), 9);
        let b = Slot::new(date(2024, 5, 1), 9);
        assert_eq!(a, b);
        assert_ne!(a, Slot::new(date(2024, 5, 1), 10));
        assert_ne!(a, Slot::new(date(2024, 5, 2), 9));
    }

    #[test]
    fn test_empty_calendar_unavailable() {
        let cal = Calendar::new();
        assert!(!cal.is_available(Slot::new(date(2024, 5, 1), 9)));
        assert!(cal.is_empty());
    }

    #[test]
    fn test_availability_membership() {
        let cal = Calendar::new().with_availability(date(2024, 5, 1), [9, 10, 14]);

        assert!(cal.is_available(Slot::new(date(2024, 5, 1), 9)));
        assert!(cal.is_available(Slot::new(date(2024, 5, 1), 14)));
        assert!(!cal.is_available(Slot::new(date(2024, 5, 1), 11)));
        assert!(!cal.is_available(Slot::new(date(2024, 5, 2), 9))); // other day
    }

    #[test]
    fn test_set_available_replaces() {
        let mut cal = Calendar::new().with_availability(date(2024, 5, 1), [9, 10]);
        cal.set_available(date(2024, 5, 1), [15]);

        assert!(!cal.is_available(Slot::new(date(2024, 5, 1), 9)));
        assert!(cal.is_available(Slot::new(date(2024, 5, 1), 15)));
    }

    #[test]
    fn test_remove_available() {
        let mut cal = Calendar::new().with_availability(date(2024, 5, 1), [9, 10]);

        assert!(cal.remove_available(date(2024, 5, 1), 9));
        assert!(!cal.is_available(Slot::new(date(2024, 5, 1), 9)));
        assert!(cal.is_available(Slot::new(date(2024, 5, 1), 10)));

        // Already gone / never recorded
        assert!(!cal.remove_available(date(2024, 5, 1), 9));
        assert!(!cal.remove_available(date(2024, 6, 1), 9));

        // Re-granting restores the slot
        cal.add_available(date(2024, 5, 1), 9);
        assert!(cal.is_available(Slot::new(date(2024, 5, 1), 9)));
    }

    #[test]
    fn test_preference_defaults_to_zero() {
        let cal = Calendar::new()
            .with_availability(date(2024, 5, 1), [9])
            .with_preference(date(2024, 5, 1), 9, 5.0);

        assert!((cal.preference(Slot::new(date(2024, 5, 1), 9)) - 5.0).abs() < 1e-10);
        assert!((cal.preference(Slot::new(date(2024, 5, 1), 10)) - 0.0).abs() < 1e-10);
        assert!((cal.preference(Slot::new(date(2024, 5, 2), 9)) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_preference_without_availability() {
        // A weighted slot is not implicitly available
        let cal = Calendar::new().with_preference(date(2024, 5, 1), 9, 3.0);

        assert!(!cal.is_available(Slot::new(date(2024, 5, 1), 9)));
        assert!((cal.preference(Slot::new(date(2024, 5, 1), 9)) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_available_hours_sorted() {
        let cal = Calendar::new().with_availability(date(2024, 5, 1), [14, 9, 10]);
        assert_eq!(cal.available_hours(date(2024, 5, 1)), vec![9, 10, 14]);
        assert!(cal.available_hours(date(2024, 5, 2)).is_empty());
    }

    #[test]
    fn test_calendar_from_json() {
        let cal: Calendar = serde_json::from_str(
            r#"{
                "available": { "2024-05-01": [9, 10] },
                "preferences": { "2024-05-01": { "9": 5.0 } }
            }"#,
        )
        .unwrap();

        assert!(cal.is_available(Slot::new(date(2024, 5, 1), 9)));
        assert!((cal.preference(Slot::new(date(2024, 5, 1), 9)) - 5.0).abs() < 1e-10);
    }
}
