use crate::application::{Config, GridRenderer, MonthView, MonthViewState, PickerApp, PickerResult, Theme};
use crate::domain::{Bounds, CalendarDate, DateRange, MonthGrid, PickerProps, Transition, YearMonth};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;

#[derive(Parser)]
#[command(name = "rangepick")]
#[command(about = "Pick a date range from a bounded month calendar")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Bounds and current selection, as YYYY-MM-DD strings
#[derive(Args, Debug, Clone, Default)]
pub struct PropsArgs {
    /// Start of the current selection
    #[arg(long)]
    pub start: Option<String>,
    /// End of the current selection (defaults to start)
    #[arg(long)]
    pub end: Option<String>,
    #[command(flatten)]
    pub bounds: BoundsArgs,
}

/// Selectable window, as YYYY-MM-DD strings
#[derive(Args, Debug, Clone, Default)]
pub struct BoundsArgs {
    /// Earliest selectable date (defaults to today)
    #[arg(long)]
    pub min: Option<String>,
    /// Latest selectable date (unbounded if omitted)
    #[arg(long)]
    pub max: Option<String>,
}

impl From<PropsArgs> for PickerProps {
    fn from(args: PropsArgs) -> Self {
        Self {
            start_date: args.start,
            end_date: args.end,
            ..args.bounds.into()
        }
    }
}

impl From<BoundsArgs> for PickerProps {
    fn from(args: BoundsArgs) -> Self {
        Self {
            min_date: args.min,
            max_date: args.max,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive month picker and print the chosen range as JSON
    Pick {
        #[command(flatten)]
        props: PropsArgs,
    },
    /// Print a month grid
    Grid {
        /// Month to show (YYYY-MM, defaults to the selection or today)
        #[arg(short, long)]
        month: Option<String>,
        /// Disable colors
        #[arg(long)]
        plain: bool,
        #[command(flatten)]
        props: PropsArgs,
    },
    /// Check whether a date is selectable
    Check {
        /// Date to check (YYYY-MM-DD)
        date: String,
        #[command(flatten)]
        bounds: BoundsArgs,
    },
    /// Replay a sequence of clicks and print every emitted range as JSON lines
    Select {
        /// Clicked dates, in order (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<String>,
        #[command(flatten)]
        bounds: BoundsArgs,
    },
}

#[derive(Debug, Serialize)]
struct SelectEvent {
    click: CalendarDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<DateRange>,
    status: &'static str,
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let config = Config::from_env();
        let today = CalendarDate::today();

        match cli.command {
            Some(Commands::Pick { props }) => run_picker(&config, &props.into(), today),
            Some(Commands::Grid { month, plain, props }) => {
                let props: PickerProps = props.into();
                let mut app = PickerApp::new(&props, today)?;
                if let Some(month) = month {
                    let month = YearMonth::parse(&month)?;
                    app.jump_to(month.first_day());
                    // jump_to refuses months outside bounds; render them anyway
                    if app.navigator().month() != month {
                        let grid = MonthGrid::build(month, app.range(), None, app.bounds(), today);
                        return print_grid(&grid, &config, plain);
                    }
                }
                print_grid(&app.grid(today), &config, plain)
            }
            Some(Commands::Check { date, bounds }) => {
                let props: PickerProps = bounds.into();
                let bounds = props.resolve(today)?.bounds;
                let date = CalendarDate::parse(&date)?;
                let verdict = if bounds.is_selectable(date) {
                    "selectable"
                } else {
                    "not selectable"
                };
                println!("{} is {} ({})", date, verdict, describe_bounds(&bounds));
                Ok(())
            }
            Some(Commands::Select { dates, bounds }) => {
                let props: PickerProps = bounds.into();
                let mut stdout = std::io::stdout().lock();
                replay_clicks(&props, &dates, today, &mut stdout)
            }
            None => run_picker(&config, &PickerProps::default(), today),
        }
    }
}

fn run_picker(config: &Config, props: &PickerProps, today: CalendarDate) -> anyhow::Result<()> {
    let app = PickerApp::from_config(config, props, today)?;
    let state = MonthViewState::new(app, today);

    let result = {
        let mut view = MonthView::new(state, Theme::by_name(&config.theme))?;
        view.run()?
    }; // view is dropped here, restoring the terminal

    match result {
        PickerResult::Committed(range) => {
            println!("{}", serde_json::to_string(&range)?);
        }
        PickerResult::Cancelled(last) => {
            if let Some(range) = last {
                println!("{}", serde_json::to_string(&range)?);
            }
            log::info!("picker closed without completing a range");
        }
    }
    Ok(())
}

fn print_grid(grid: &MonthGrid, config: &Config, plain: bool) -> anyhow::Result<()> {
    let renderer = if plain {
        GridRenderer::plain()
    } else {
        GridRenderer::colored(Theme::by_name(&config.theme))
    };
    renderer.print(grid);
    Ok(())
}

fn describe_bounds(bounds: &Bounds) -> String {
    match bounds.max {
        Some(max) => format!("window {} to {}", bounds.min, max),
        None => format!("window from {}", bounds.min),
    }
}

/// Feeds `dates` through a fresh picker as clicks, writing one JSON line per
/// click.
pub fn replay_clicks(
    props: &PickerProps,
    dates: &[String],
    today: CalendarDate,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut app = PickerApp::new(props, today)?;

    for raw in dates {
        let date = CalendarDate::parse(raw).with_context(|| format!("bad click date '{}'", raw))?;
        let event = match app.click(date) {
            Transition::Ignored => SelectEvent {
                click: date,
                range: None,
                status: "ignored",
            },
            Transition::Started(range) => SelectEvent {
                click: date,
                range: Some(range),
                status: "started",
            },
            Transition::Completed(range) => SelectEvent {
                click: date,
                range: Some(range),
                status: "completed",
            },
        };
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }
    Ok(())
}
