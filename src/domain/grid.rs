use crate::domain::{Bounds, CalendarDate, DateRange, YearMonth};
use log::debug;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Display variant for a cell, resolved once from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellVariant {
    Blank,
    Normal,
    Today,
    Boundary,
    Preview,
    InRange,
    RangeEdge,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub is_today: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_within_range: bool,
    pub is_in_preview: bool,
    pub is_disabled: bool,
    pub is_boundary_marker: bool,
}

impl DayCell {
    pub fn variant(&self) -> CellVariant {
        if self.is_disabled {
            CellVariant::Disabled
        } else if self.is_start || self.is_end {
            CellVariant::RangeEdge
        } else if self.is_within_range {
            CellVariant::InRange
        } else if self.is_in_preview {
            CellVariant::Preview
        } else if self.is_boundary_marker {
            CellVariant::Boundary
        } else if self.is_today {
            CellVariant::Today
        } else {
            CellVariant::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn variant(&self) -> CellVariant {
        match self {
            GridCell::Blank => CellVariant::Blank,
            GridCell::Day(day) => day.variant(),
        }
    }

    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(day) => Some(day),
        }
    }
}

/// One page of the calendar: leading blanks followed by every day of the
/// month, laid out Sunday-first in rows of seven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub leading_blanks: usize,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(
        month: YearMonth,
        range: Option<&DateRange>,
        preview: Option<&DateRange>,
        bounds: &Bounds,
        today: CalendarDate,
    ) -> Self {
        let leading_blanks = month.leading_blanks() as usize;
        let days = month.days_in_month();

        let mut cells = Vec::with_capacity(leading_blanks + days as usize);
        cells.extend(std::iter::repeat_n(GridCell::Blank, leading_blanks));

        for date in (1..=days).filter_map(|day| month.day(day)) {
            cells.push(GridCell::Day(DayCell {
                date,
                is_today: date == today,
                is_start: range.is_some_and(|r| r.start() == date),
                is_end: range.is_some_and(|r| r.end() == date),
                is_within_range: range.is_some_and(|r| r.contains(date)),
                is_in_preview: preview.is_some_and(|p| p.contains(date)),
                is_disabled: !bounds.is_selectable(date),
                is_boundary_marker: bounds.is_boundary(date),
            }));
        }

        Self {
            month,
            leading_blanks,
            cells,
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn cell_for(&self, date: CalendarDate) -> Option<&DayCell> {
        if !self.month.contains(date) {
            return None;
        }
        self.cells
            .get(self.leading_blanks + date.day() as usize - 1)
            .and_then(GridCell::day)
    }
}

/// Month paging that refuses to leave the selectable window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNavigator {
    month: YearMonth,
    bounds: Bounds,
}

impl MonthNavigator {
    pub fn new(month: YearMonth, bounds: Bounds) -> Self {
        Self { month, bounds }
    }

    /// Opens on the start of the current range if there is one, otherwise on
    /// today. Either way the anchor is clamped into the window.
    pub fn initial(range: Option<&DateRange>, bounds: Bounds, today: CalendarDate) -> Self {
        let anchor = range.map_or(today, |range| range.start());
        Self::new(bounds.clamp(anchor).year_month(), bounds)
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Whether the visible month holds at least one selectable day.
    pub fn is_reachable(&self) -> bool {
        self.month.last_day() >= self.bounds.min
            && self.bounds.max.is_none_or(|max| self.month.first_day() <= max)
    }

    pub fn can_next(&self) -> bool {
        match self.month.next() {
            Some(next) => self.bounds.max.is_none_or(|max| next.first_day() <= max),
            None => false,
        }
    }

    pub fn can_prev(&self) -> bool {
        match self.month.prev() {
            Some(prev) => prev.last_day() >= self.bounds.min,
            None => false,
        }
    }

    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            debug!("next month blocked at {}", self.month);
            return false;
        }
        if let Some(next) = self.month.next() {
            self.month = next;
        }
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            debug!("previous month blocked at {}", self.month);
            return false;
        }
        if let Some(prev) = self.month.prev() {
            self.month = prev;
        }
        true
    }

    /// Show the month containing `date`, if it is selectable.
    pub fn jump_to(&mut self, date: CalendarDate) -> bool {
        if !self.bounds.is_selectable(date) {
            return false;
        }
        self.month = date.year_month();
        true
    }
}
