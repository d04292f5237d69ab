use super::theme::Theme;
use crate::application::PickerApp;
use crate::domain::{CalendarDate, DateRange, GridCell, MonthGrid, SelectionState, Transition, WEEKDAY_LABELS};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{self, Stdout, stdout};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResult {
    /// A range was completed with the second click
    Committed(DateRange),
    /// User left without completing; carries the last committed range, if any
    Cancelled(Option<DateRange>),
}

/// Keyboard-driven picker state, separate from the terminal so it can be
/// driven in tests.
pub struct MonthViewState {
    app: PickerApp,
    /// Day under the keyboard cursor, acts as the hover position
    cursor: CalendarDate,
    today: CalendarDate,
    show_help: bool,
    should_exit: bool,
    committed: Option<DateRange>,
}

impl MonthViewState {
    pub fn new(app: PickerApp, today: CalendarDate) -> Self {
        let cursor = match app.range() {
            Some(range) => range.start(),
            None => app.bounds().clamp(today),
        };
        Self {
            app,
            cursor,
            today,
            show_help: false,
            should_exit: false,
            committed: None,
        }
    }

    pub fn app(&self) -> &PickerApp {
        &self.app
    }

    pub fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn result(&self) -> PickerResult {
        match self.committed {
            Some(range) => PickerResult::Committed(range),
            None => PickerResult::Cancelled(self.app.range().copied()),
        }
    }

    pub fn grid(&self) -> MonthGrid {
        self.app.grid(self.today)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), _) => {
                self.should_exit = true;
            }

            // Escape drops a pending selection first, exits when idle
            (KeyCode::Esc, _) => {
                if !self.app.cancel() {
                    self.should_exit = true;
                }
                self.app.open();
            }

            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => self.move_cursor(-1),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => self.move_cursor(1),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => self.move_cursor(-7),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => self.move_cursor(7),

            (KeyCode::PageDown, _) | (KeyCode::Char('n'), _) => {
                if self.app.next_month() {
                    self.snap_cursor_to_month();
                }
            }
            (KeyCode::PageUp, _) | (KeyCode::Char('p'), _) => {
                if self.app.prev_month() {
                    self.snap_cursor_to_month();
                }
            }

            (KeyCode::Char('t'), _) => {
                if self.app.jump_to(self.today) {
                    self.cursor = self.today;
                    self.app.hover(self.cursor);
                }
            }

            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => {
                if let Transition::Completed(range) = self.app.click(self.cursor) {
                    self.committed = Some(range);
                    self.should_exit = true;
                }
            }

            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }
    }

    fn move_cursor(&mut self, days: i64) {
        let Some(target) = self.cursor.add_days(days) else {
            return;
        };

        let visible = self.app.navigator().month();
        if !visible.contains(target) {
            let moved = if target > self.cursor {
                self.app.next_month()
            } else {
                self.app.prev_month()
            };
            if !moved {
                return;
            }
        }

        self.cursor = target;
        self.app.hover(self.cursor);
    }

    /// Keep the day of month when paging, clamped to the new month's length.
    fn snap_cursor_to_month(&mut self) {
        let month = self.app.navigator().month();
        let day = self.cursor.day().min(month.days_in_month());
        if let Some(date) = month.day(day) {
            self.cursor = date;
            self.app.hover(self.cursor);
        }
    }
}

const CALENDAR_HEIGHT: u16 = 15; // title + header + 6 weeks * 2 rows
const STATUS_HEIGHT: u16 = 2;
const HELP_HEIGHT: u16 = 2;
const CALENDAR_WIDTH: u16 = 48;

/// One line per active notification.
fn notification_height(active: usize) -> u16 {
    u16::try_from(active).unwrap_or(u16::MAX)
}

fn total_height(notification_height: u16, show_help: bool) -> u16 {
    let help_height = if show_help { HELP_HEIGHT } else { 0 };
    CALENDAR_HEIGHT
        .saturating_add(STATUS_HEIGHT)
        .saturating_add(notification_height)
        .saturating_add(help_height)
}

pub struct MonthView {
    state: MonthViewState,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
}

impl MonthView {
    pub fn new(state: MonthViewState, theme: Theme) -> io::Result<Self> {
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            state,
            terminal,
            theme,
        })
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        Rect {
            x: available.x + available.width.saturating_sub(width) / 2,
            y: available.y + available.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn create_month_table(state: &MonthViewState, grid: &MonthGrid, theme: &Theme) -> Table<'static> {
        let header = Row::new(
            WEEKDAY_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let colors = if i == 0 || i == 6 {
                        &theme.colors.weekend
                    } else {
                        &theme.colors.header
                    };
                    Cell::from(*label).style(colors.to_ratatui())
                })
                .collect::<Vec<_>>(),
        )
        .height(1);

        let rows: Vec<Row> = grid
            .weeks()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .map(|cell| match cell {
                        GridCell::Blank => Cell::from(""),
                        GridCell::Day(day) => {
                            let mut style = theme.cell_style(cell.variant());
                            if day.date == state.cursor {
                                style = style
                                    .patch(theme.colors.cursor.to_ratatui())
                                    .add_modifier(Modifier::REVERSED);
                            }
                            Cell::from(format!("{:>3}", day.date.day())).style(style)
                        }
                    })
                    .collect();
                Row::new(cells).height(2)
            })
            .collect();

        let navigator = state.app.navigator();
        let title = format!(
            "{} {} {}",
            if navigator.can_prev() { "<" } else { " " },
            grid.month.title(),
            if navigator.can_next() { ">" } else { " " },
        );

        Table::new(rows, [Constraint::Ratio(1, 7); 7])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(title)
                    .title_style(theme.colors.header.to_ratatui())
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    fn create_status_line(state: &MonthViewState, theme: &Theme) -> Paragraph<'static> {
        let text = match (state.app.selector().state(), state.app.selector().preview()) {
            (SelectionState::Pending(start), Some(preview)) => {
                format!("From {}: {} ({} days)", start, preview, preview.len_days())
            }
            (SelectionState::Pending(start), None) => format!("From {}: pick an end date", start),
            (SelectionState::Idle, _) => match state.app.range() {
                Some(range) => format!("Selected {}", range),
                None => "Pick a start date".to_string(),
            },
        };

        Paragraph::new(Line::from(Span::styled(text, theme.colors.normal.to_ratatui())))
            .alignment(Alignment::Center)
    }

    fn create_notifications(state: &MonthViewState, theme: &Theme) -> Paragraph<'static> {
        let lines: Vec<Line> = state
            .app
            .notifications()
            .active()
            .map(|n| {
                Line::from(Span::styled(
                    format!("{} {}", n.kind.symbol(), n.message),
                    theme.notification_colors(n.kind).to_ratatui(),
                ))
            })
            .collect();

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn create_help_text(theme: &Theme) -> Paragraph<'static> {
        let help_text = vec![Line::from(vec![Span::styled(
            "←→↑↓/hjkl=Move • Enter=Pick • n/p=Month • t=Today • Esc=Cancel • ?=Help • q=Quit",
            Style::default().patch(theme.colors.help_text.to_ratatui()),
        )])];

        Paragraph::new(help_text)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center)
    }

    /// Run the picker loop until a range is completed or the user leaves
    pub fn run(&mut self) -> io::Result<PickerResult> {

        loop {
            if self.state.should_exit() {
                break;
            }

            self.state.app.notifications_mut().prune_expired(Instant::now());
            let notes_height = notification_height(self.state.app.notifications().len());

            let grid = self.state.grid();
            let state = &self.state;
            let theme = &self.theme;

            self.terminal.draw(|frame| {
                let size = frame.area();
                let help_height = if state.show_help { HELP_HEIGHT } else { 0 };
                let height = total_height(notes_height, state.show_help);
                let area = Self::calculate_centered_area(size, CALENDAR_WIDTH, height);

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(CALENDAR_HEIGHT),
                        Constraint::Length(STATUS_HEIGHT),
                        Constraint::Length(notes_height),
                        Constraint::Length(help_height),
                    ])
                    .split(area);

                frame.render_widget(Self::create_month_table(state, &grid, theme), chunks[0]);
                frame.render_widget(Self::create_status_line(state, theme), chunks[1]);
                frame.render_widget(Self::create_notifications(state, theme), chunks[2]);
                if state.show_help {
                    frame.render_widget(Self::create_help_text(theme), chunks[3]);
                }
            })?;

            // Poll with a timeout so notifications expire without input
            if poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.state.handle_key_event(key);
                }
            }
        }

        self.cleanup()?;
        Ok(self.state.result())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for MonthView {
    fn drop(&mut self) {
        // Fallback cleanup if run() bailed out early
        let _ = self.cleanup();
    }
}
