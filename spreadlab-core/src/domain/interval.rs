use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed calendar interval `[start, end]`.
///
/// An interval with `start > end` is allowed and contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Single-day interval.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Whether `other` lies entirely within this interval.
    pub fn covers(&self, other: &DateInterval) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }
}
