use crate::domain::CalendarDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range of calendar days. `start <= end` always holds; a single
/// day is `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeParts")]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

/// Wire shape; reversed endpoints are reordered on the way in.
#[derive(Deserialize)]
struct RangeParts {
    start: CalendarDate,
    end: CalendarDate,
}

impl From<RangeParts> for DateRange {
    fn from(parts: RangeParts) -> Self {
        Self::new(parts.start, parts.end)
    }
}

impl DateRange {
    /// Builds a range from two dates in either order.
    pub fn new(a: CalendarDate, b: CalendarDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn day(date: CalendarDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end.naive() - self.start.naive()).num_days() + 1
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        let start = self.start;
        (0..self.len_days()).filter_map(move |i| start.add_days(i))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} .. {}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_new_orders_endpoints() {
        let range = DateRange::new(date(2024, 1, 15), date(2024, 1, 12));
        assert_eq!(range.start(), date(2024, 1, 12));
        assert_eq!(range.end(), date(2024, 1, 15));
        assert_eq!(range, DateRange::new(date(2024, 1, 12), date(2024, 1, 15)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 12), date(2024, 1, 15));

        assert!(range.contains(date(2024, 1, 12)));
        assert!(range.contains(date(2024, 1, 13)));
        assert!(range.contains(date(2024, 1, 15)));
        assert!(!range.contains(date(2024, 1, 11)));
        assert!(!range.contains(date(2024, 1, 16)));
    }

    #[test]
    fn test_single_day_contains_only_itself() {
        let range = DateRange::day(date(2024, 2, 29));
        assert!(range.is_single_day());
        assert!(range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 2, 28)));
        assert!(!range.contains(date(2024, 3, 1)));
        assert_eq!(range.len_days(), 1);
    }

    #[test]
    fn test_days_spans_month_boundary() {
        let range = DateRange::new(date(2024, 1, 30), date(2024, 2, 2));
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 1, 30),
                date(2024, 1, 31),
                date(2024, 2, 1),
                date(2024, 2, 2)
            ]
        );
    }

    #[test]
    fn test_serializes_as_start_end_strings() {
        let range = DateRange::new(date(2024, 1, 12), date(2024, 1, 15));
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"start":"2024-01-12","end":"2024-01-15"}"#);
    }

    #[test]
    fn test_deserialize_reorders_reversed_endpoints() {
        let range: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-15","end":"2024-01-12"}"#).unwrap();
        assert_eq!(range.start(), date(2024, 1, 12));
        assert_eq!(range.end(), date(2024, 1, 15));
    }
}
