use crate::application::Config;
use crate::domain::{
    Bounds, CalendarDate, DateParseError, DateRange, MonthGrid, MonthNavigator,
    NotificationKind, NotificationQueue, PickerProps, RangeSelector, Transition,
};
use crate::infrastructure::{ChangeContext, ChangeKind, HookRegistry, SelectionLoggerHook};
use log::debug;

/// Top-level controller: owns the selector, the visible month, the
/// notification queue and the change hooks.
pub struct PickerApp {
    selector: RangeSelector,
    navigator: MonthNavigator,
    notifications: NotificationQueue,
    hooks: HookRegistry,
    open: bool,
}

impl PickerApp {
    pub fn new(props: &PickerProps, today: CalendarDate) -> Result<Self, DateParseError> {
        Self::with_hooks(props, today, HookRegistry::new(), crate::application::DEFAULT_NOTIFICATION_CAPACITY)
    }

    pub fn with_hooks(
        props: &PickerProps,
        today: CalendarDate,
        hooks: HookRegistry,
        notification_capacity: usize,
    ) -> Result<Self, DateParseError> {
        let resolved = props.resolve(today)?;
        Ok(Self {
            selector: RangeSelector::new(resolved.bounds, resolved.range),
            navigator: MonthNavigator::initial(resolved.range.as_ref(), resolved.bounds, today),
            notifications: NotificationQueue::with_capacity(notification_capacity),
            hooks,
            open: true,
        })
    }

    /// Controller wired the way the CLI runs it, with plugins from config.
    pub fn from_config(
        config: &Config,
        props: &PickerProps,
        today: CalendarDate,
    ) -> Result<Self, DateParseError> {
        let mut hooks = HookRegistry::new();
        if config.log_selections {
            hooks.register(SelectionLoggerHook::new(config.data_dir.clone()));
        }
        Self::with_hooks(props, today, hooks, config.notification_capacity)
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    pub fn navigator(&self) -> &MonthNavigator {
        &self.navigator
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub fn bounds(&self) -> &Bounds {
        self.selector.bounds()
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.selector.range()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn click(&mut self, date: CalendarDate) -> Transition {
        let transition = self.selector.click(date);

        match transition {
            Transition::Ignored => {}
            Transition::Started(range) => {
                self.open = true;
                self.emit(range, ChangeKind::Provisional);
            }
            Transition::Completed(range) => {
                self.open = false;
                self.emit(range, ChangeKind::Final);
                self.notifications
                    .enqueue(NotificationKind::Success, format!("Selected {}", range));
            }
        }
        transition
    }

    pub fn hover(&mut self, date: CalendarDate) -> Option<DateRange> {
        self.selector.hover(date)
    }

    pub fn leave(&mut self) {
        self.selector.leave();
    }

    /// Escape: drops a pending selection and closes the picker.
    pub fn cancel(&mut self) -> bool {
        self.open = false;
        self.selector.cancel()
    }

    pub fn next_month(&mut self) -> bool {
        self.navigator.next()
    }

    pub fn prev_month(&mut self) -> bool {
        self.navigator.prev()
    }

    pub fn jump_to(&mut self, date: CalendarDate) -> bool {
        self.navigator.jump_to(date)
    }

    /// Re-render with new props from the caller. Changed bounds reset any
    /// pending selection, and move the view if its month fell out of range.
    pub fn apply_props(&mut self, props: &PickerProps, today: CalendarDate) -> Result<(), DateParseError> {
        let resolved = props.resolve(today)?;
        self.selector.set_bounds(resolved.bounds);
        self.selector.set_range(resolved.range);
        self.navigator.set_bounds(resolved.bounds);
        if !self.navigator.is_reachable() {
            self.navigator = MonthNavigator::initial(resolved.range.as_ref(), resolved.bounds, today);
        }
        Ok(())
    }

    pub fn grid(&self, today: CalendarDate) -> MonthGrid {
        MonthGrid::build(
            self.navigator.month(),
            self.selector.range(),
            self.selector.preview(),
            self.selector.bounds(),
            today,
        )
    }

    /// Dispatch to every hook. Failures surface as error notifications.
    fn emit(&mut self, range: DateRange, kind: ChangeKind) {
        debug!("emitting {:?} range {}", kind, range);
        for failure in self.hooks.execute_change_hooks(&ChangeContext { range, kind }) {
            self.notifications.enqueue(
                NotificationKind::Error,
                format!("{} failed: {}", failure.hook, failure.error),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SelectionState, YearMonth};
    use crate::infrastructure::{ChangeHook, FnHook};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn props() -> PickerProps {
        PickerProps {
            min_date: Some("2024-01-10".to_string()),
            max_date: Some("2024-01-20".to_string()),
            ..Default::default()
        }
    }

    struct BrokenHook;

    impl ChangeHook for BrokenHook {
        fn on_change(&self, _context: &ChangeContext) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }

        fn name(&self) -> &str {
            "Broken"
        }
    }

    fn recording_app() -> (PickerApp, Rc<RefCell<Vec<ChangeContext>>>) {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&emitted);
        let mut app = PickerApp::new(&props(), date(2024, 1, 5)).unwrap();
        app.hooks_mut().register(FnHook::new("recorder", move |ctx: &ChangeContext| {
            sink.borrow_mut().push(*ctx)
        }));
        (app, emitted)
    }

    #[test]
    fn test_every_emit_reaches_hooks() {
        let (mut app, emitted) = recording_app();

        app.click(date(2024, 1, 15));
        assert!(app.is_open());
        app.click(date(2024, 1, 12));
        assert!(!app.is_open());
        app.click(date(2024, 1, 25));

        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].range, DateRange::day(date(2024, 1, 15)));
        assert_eq!(emitted[0].kind, ChangeKind::Provisional);
        assert_eq!(emitted[1].range, DateRange::new(date(2024, 1, 12), date(2024, 1, 15)));
        assert_eq!(emitted[1].kind, ChangeKind::Final);
    }

    #[test]
    fn test_completed_range_enqueues_notification() {
        let (mut app, _) = recording_app();
        app.click(date(2024, 1, 11));
        assert!(app.notifications().is_empty());

        app.click(date(2024, 1, 13));
        let note = app.notifications().active().next().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.message, "Selected 2024-01-11 .. 2024-01-13");
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let (mut app, emitted) = recording_app();
        app.click(date(2024, 1, 15));
        assert!(app.cancel());
        assert!(!app.is_open());
        assert_eq!(app.selector().state(), SelectionState::Idle);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_opens_on_min_month_and_cannot_leave_it() {
        let (mut app, _) = recording_app();
        assert_eq!(app.navigator().month(), YearMonth::new(2024, 1).unwrap());
        assert!(!app.prev_month());
        assert!(!app.next_month());
    }

    #[test]
    fn test_grid_projects_preview() {
        let (mut app, _) = recording_app();
        app.click(date(2024, 1, 12));
        app.hover(date(2024, 1, 14));

        let grid = app.grid(date(2024, 1, 5));
        assert!(grid.cell_for(date(2024, 1, 13)).unwrap().is_in_preview);
        assert!(grid.cell_for(date(2024, 1, 12)).unwrap().is_start);

        app.leave();
        let grid = app.grid(date(2024, 1, 5));
        assert!(!grid.cell_for(date(2024, 1, 13)).unwrap().is_in_preview);
    }

    #[test]
    fn test_new_bounds_reset_pending() {
        let (mut app, _) = recording_app();
        app.click(date(2024, 1, 15));

        let wider = PickerProps {
            min_date: Some("2024-01-01".to_string()),
            start_date: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        app.apply_props(&wider, date(2024, 1, 5)).unwrap();

        assert_eq!(app.selector().state(), SelectionState::Idle);
        assert_eq!(app.range(), Some(&DateRange::day(date(2024, 1, 15))));
        assert!(app.next_month());
    }

    #[test]
    fn test_from_config_registers_logger() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            theme: "dark".to_string(),
            notification_capacity: 2,
            log_selections: true,
        };
        let mut app = PickerApp::from_config(&config, &props(), date(2024, 1, 5)).unwrap();
        assert_eq!(app.hooks_mut().list_hooks(), vec!["Selection Logger"]);

        app.click(date(2024, 1, 10));
        app.click(date(2024, 1, 20));
        let log = std::fs::read_to_string(temp_dir.path().join("selection_log.txt")).unwrap();
        assert!(log.contains("2024-01-10 to 2024-01-20"));
    }

    #[test]
    fn test_hook_failure_becomes_error_notification() {
        let (mut app, emitted) = recording_app();
        app.hooks_mut().register(BrokenHook);

        app.click(date(2024, 1, 15));

        assert_eq!(emitted.borrow().len(), 1);
        let note = app.notifications().active().next().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Broken failed: disk full");
    }

    #[test]
    fn test_new_bounds_move_view_into_window() {
        let (mut app, _) = recording_app();
        assert_eq!(app.navigator().month(), YearMonth::new(2024, 1).unwrap());

        let march = PickerProps {
            min_date: Some("2024-03-05".to_string()),
            max_date: Some("2024-04-20".to_string()),
            ..Default::default()
        };
        app.apply_props(&march, date(2024, 1, 5)).unwrap();
        assert_eq!(app.navigator().month(), YearMonth::new(2024, 3).unwrap());
        assert!(!app.prev_month());
        assert!(app.next_month());

        // still reachable under wider bounds, so the view stays put
        let wider = PickerProps {
            min_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        app.apply_props(&wider, date(2024, 1, 5)).unwrap();
        assert_eq!(app.navigator().month(), YearMonth::new(2024, 4).unwrap());
    }
}
