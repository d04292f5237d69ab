use crate::domain::{Bounds, CalendarDate, DateRange};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    /// First date picked, waiting for the second click.
    Pending(CalendarDate),
}

/// Outcome of a click on a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Date failed the bounds check. Nothing changed, nothing emitted.
    Ignored,
    /// First click: optimistic single-day range, picker stays open.
    Started(DateRange),
    /// Second click: final range, picker closes.
    Completed(DateRange),
}

impl Transition {
    pub fn emitted(&self) -> Option<DateRange> {
        match self {
            Transition::Ignored => None,
            Transition::Started(range) | Transition::Completed(range) => Some(*range),
        }
    }

    pub fn closes_picker(&self) -> bool {
        matches!(self, Transition::Completed(_))
    }
}

/// Two-click range selection over a bounded calendar.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    state: SelectionState,
    bounds: Bounds,
    /// Last committed range, as echoed back by the caller.
    range: Option<DateRange>,
    preview: Option<DateRange>,
}

impl RangeSelector {
    pub fn new(bounds: Bounds, range: Option<DateRange>) -> Self {
        Self {
            state: SelectionState::Idle,
            bounds,
            range,
            preview: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    pub fn preview(&self) -> Option<&DateRange> {
        self.preview.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SelectionState::Pending(_))
    }

    pub fn click(&mut self, date: CalendarDate) -> Transition {
        if !self.bounds.is_selectable(date) {
            debug!("ignoring click on {} outside bounds", date);
            return Transition::Ignored;
        }

        self.preview = None;

        let transition = match self.state {
            SelectionState::Idle => {
                self.state = SelectionState::Pending(date);
                Transition::Started(DateRange::day(date))
            }
            SelectionState::Pending(start) => {
                self.state = SelectionState::Idle;
                Transition::Completed(DateRange::new(start, date))
            }
        };

        if let Some(range) = transition.emitted() {
            self.range = Some(range);
        }
        debug!("click on {} -> {:?}", date, transition);
        transition
    }

    /// Preview the range that clicking `date` would commit. Never touches the
    /// selection state.
    pub fn hover(&mut self, date: CalendarDate) -> Option<DateRange> {
        self.preview = match self.state {
            SelectionState::Pending(start) if self.bounds.is_selectable(date) => {
                Some(DateRange::new(start, date))
            }
            _ => None,
        };
        self.preview
    }

    pub fn leave(&mut self) {
        self.preview = None;
    }

    /// Drop a pending selection without emitting. Returns whether there was
    /// anything to drop.
    pub fn cancel(&mut self) -> bool {
        self.preview = None;
        match self.state {
            SelectionState::Pending(start) => {
                debug!("cancelled pending selection from {}", start);
                self.state = SelectionState::Idle;
                true
            }
            SelectionState::Idle => false,
        }
    }

    /// New bounds from the caller. Any in-flight selection is discarded when
    /// they differ from the current ones.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds == self.bounds {
            return;
        }
        debug!("bounds changed to {:?}, resetting selection", bounds);
        self.bounds = bounds;
        self.state = SelectionState::Idle;
        self.preview = None;
    }

    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.range = range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn selector() -> RangeSelector {
        RangeSelector::new(
            Bounds::new(date(2024, 1, 10), Some(date(2024, 1, 20))),
            None,
        )
    }

    #[test]
    fn test_first_click_emits_single_day() {
        let mut selector = selector();
        let transition = selector.click(date(2024, 1, 15));

        assert_eq!(transition, Transition::Started(DateRange::day(date(2024, 1, 15))));
        assert!(!transition.closes_picker());
        assert_eq!(selector.state(), SelectionState::Pending(date(2024, 1, 15)));
    }

    #[test]
    fn test_scenario_reverse_click_then_out_of_bounds() {
        let mut selector = selector();

        let first = selector.click(date(2024, 1, 15));
        assert_eq!(first.emitted(), Some(DateRange::day(date(2024, 1, 15))));

        let second = selector.click(date(2024, 1, 12));
        let expected = DateRange::new(date(2024, 1, 12), date(2024, 1, 15));
        assert_eq!(second, Transition::Completed(expected));
        assert_eq!(expected.start(), date(2024, 1, 12));
        assert_eq!(selector.state(), SelectionState::Idle);

        let third = selector.click(date(2024, 1, 25));
        assert_eq!(third, Transition::Ignored);
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.range(), Some(&expected));
    }

    #[test]
    fn test_out_of_bounds_click_leaves_pending_untouched() {
        let mut selector = selector();
        selector.click(date(2024, 1, 15));

        for out in [date(2024, 1, 9), date(2024, 1, 21), date(2023, 6, 1)] {
            assert_eq!(selector.click(out), Transition::Ignored);
            assert_eq!(selector.state(), SelectionState::Pending(date(2024, 1, 15)));
            assert_eq!(selector.range(), Some(&DateRange::day(date(2024, 1, 15))));
        }
    }

    #[test]
    fn test_same_date_twice_completes_single_day() {
        let mut selector = selector();
        selector.click(date(2024, 1, 10));
        let transition = selector.click(date(2024, 1, 10));

        assert_eq!(transition, Transition::Completed(DateRange::day(date(2024, 1, 10))));
        assert!(transition.closes_picker());
        assert_eq!(selector.state(), SelectionState::Idle);
    }

    #[test]
    fn test_click_order_does_not_matter() {
        let days: Vec<_> = (10..=20).map(|d| date(2024, 1, d)).collect();
        for &a in &days {
            for &b in &days {
                let mut forward = selector();
                forward.click(a);
                let one = forward.click(b).emitted().unwrap();

                let mut backward = selector();
                backward.click(b);
                let other = backward.click(a).emitted().unwrap();

                assert!(one.start() <= one.end());
                assert_eq!(one, other);
            }
        }
    }

    #[test]
    fn test_hover_previews_without_committing() {
        let mut selector = selector();
        assert_eq!(selector.hover(date(2024, 1, 12)), None);

        selector.click(date(2024, 1, 15));
        let preview = selector.hover(date(2024, 1, 11));
        assert_eq!(preview, Some(DateRange::new(date(2024, 1, 11), date(2024, 1, 15))));
        assert_eq!(selector.state(), SelectionState::Pending(date(2024, 1, 15)));
        assert_eq!(selector.range(), Some(&DateRange::day(date(2024, 1, 15))));

        assert_eq!(selector.hover(date(2024, 1, 30)), None);
        assert_eq!(selector.preview(), None);

        selector.hover(date(2024, 1, 18));
        selector.leave();
        assert_eq!(selector.preview(), None);
    }

    #[test]
    fn test_click_discards_preview() {
        let mut selector = selector();
        selector.click(date(2024, 1, 15));
        selector.hover(date(2024, 1, 18));
        selector.click(date(2024, 1, 17));
        assert_eq!(selector.preview(), None);
    }

    #[test]
    fn test_cancel_returns_to_idle_without_emit() {
        let mut selector = selector();
        assert!(!selector.cancel());

        selector.click(date(2024, 1, 15));
        selector.hover(date(2024, 1, 18));
        assert!(selector.cancel());
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.preview(), None);

        // next click starts fresh
        assert!(matches!(selector.click(date(2024, 1, 18)), Transition::Started(_)));
    }

    #[test]
    fn test_bounds_change_resets_pending() {
        let mut selector = selector();
        selector.click(date(2024, 1, 15));

        selector.set_bounds(Bounds::new(date(2024, 1, 10), Some(date(2024, 1, 20))));
        assert!(selector.is_pending());

        selector.set_bounds(Bounds::new(date(2024, 1, 1), None));
        assert_eq!(selector.state(), SelectionState::Idle);
        assert!(selector.bounds().is_selectable(date(2024, 2, 1)));
    }
}
