use super::theme::Theme;
use crate::domain::{CellVariant, GridCell, MonthGrid, WEEKDAY_LABELS};

/// Prints a month grid to stdout, without taking over the terminal.
pub struct GridRenderer {
    theme: Option<Theme>,
}

impl GridRenderer {
    pub fn plain() -> Self {
        Self { theme: None }
    }

    pub fn colored(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }

    pub fn render(&self, grid: &MonthGrid) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:^34}\n", grid.month.title()));
        out.push_str(
            &WEEKDAY_LABELS
                .iter()
                .map(|label| format!("{:>4}", label))
                .collect::<Vec<_>>()
                .join(" "),
        );
        out.push('\n');

        for week in grid.weeks() {
            let line = week
                .iter()
                .map(|cell| self.render_cell(cell))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    pub fn print(&self, grid: &MonthGrid) {
        print!("{}", self.render(grid));
    }

    fn render_cell(&self, cell: &GridCell) -> String {
        let variant = cell.variant();
        let text = match cell {
            GridCell::Blank => "    ".to_string(),
            GridCell::Day(day) => format!(
                "{}{:>2}{}",
                open_marker(variant),
                day.date.day(),
                close_marker(variant)
            ),
        };

        match &self.theme {
            Some(theme) if variant != CellVariant::Blank => theme.cell_colors(variant).colorize(&text),
            _ => text,
        }
    }
}

/// Markers keep range state readable without color. Every cell is four
/// columns wide.
fn open_marker(variant: CellVariant) -> &'static str {
    match variant {
        CellVariant::RangeEdge => "[",
        CellVariant::InRange => "=",
        CellVariant::Preview => "~",
        CellVariant::Disabled => "(",
        _ => " ",
    }
}

fn close_marker(variant: CellVariant) -> &'static str {
    match variant {
        CellVariant::RangeEdge => "]",
        CellVariant::InRange => "=",
        CellVariant::Preview => "~",
        CellVariant::Disabled => ")",
        CellVariant::Today => "*",
        CellVariant::Boundary => "|",
        _ => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bounds, CalendarDate, DateRange, YearMonth};

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_render_layout() {
        let range = DateRange::new(date(2024, 1, 12), date(2024, 1, 15));
        let bounds = Bounds::new(date(2024, 1, 10), Some(date(2024, 1, 20)));
        let grid = MonthGrid::build(
            YearMonth::new(2024, 1).unwrap(),
            Some(&range),
            None,
            &bounds,
            date(2024, 1, 1),
        );

        let output = GridRenderer::plain().render(&grid);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0].trim(), "January 2024");
        assert_eq!(lines[1], " Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        // header, weekday row, five weeks
        assert_eq!(lines.len(), 7);
        assert!(lines[2].starts_with("     ( 1)"));
        assert!(output.contains("[12]"));
        assert!(output.contains("=13="));
        assert!(output.contains("[15]"));
        assert!(output.contains(" 10|"));
        assert!(output.contains("(21)"));
    }
}
