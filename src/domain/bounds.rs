use crate::domain::CalendarDate;

/// Inclusive window of selectable dates.
///
/// `min <= max` is the caller's responsibility. With `min > max` nothing is
/// selectable, and navigation results are unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: CalendarDate,
    pub max: Option<CalendarDate>,
}

impl Bounds {
    pub fn new(min: CalendarDate, max: Option<CalendarDate>) -> Self {
        Self { min, max }
    }

    pub fn from_min(min: CalendarDate) -> Self {
        Self { min, max: None }
    }

    /// The one bounds predicate. Click handling, hover preview and grid
    /// rendering all go through here.
    pub fn is_selectable(&self, date: CalendarDate) -> bool {
        if date < self.min {
            return false;
        }
        match self.max {
            Some(max) => date <= max,
            None => true,
        }
    }

    pub fn is_boundary(&self, date: CalendarDate) -> bool {
        date == self.min || self.max == Some(date)
    }

    /// Nearest selectable date to `date`.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        if date < self.min {
            return self.min;
        }
        match self.max {
            Some(max) if date > max => max,
            _ => date,
        }
    }
}
