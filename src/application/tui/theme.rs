use crate::domain::{CellVariant, NotificationKind};
use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Day cells
    pub normal: ColorPair,
    pub today: ColorPair,
    pub boundary: ColorPair,
    pub preview: ColorPair,
    pub in_range: ColorPair,
    pub range_edge: ColorPair,
    pub disabled: ColorPair,
    pub cursor: ColorPair,

    // UI elements
    pub header: ColorPair,
    pub weekend: ColorPair,
    pub help_text: ColorPair,

    // Notifications
    pub info: ColorPair,
    pub success: ColorPair,
    pub warning: ColorPair,
    pub error: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// Apply color to text for plain terminal output
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
    match color {
        CrosstermColor::Black => RatatuiColor::Black,
        CrosstermColor::DarkRed => RatatuiColor::Red,
        CrosstermColor::DarkGreen => RatatuiColor::Green,
        CrosstermColor::DarkYellow => RatatuiColor::Yellow,
        CrosstermColor::DarkBlue => RatatuiColor::Blue,
        CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
        CrosstermColor::DarkCyan => RatatuiColor::Cyan,
        CrosstermColor::Grey => RatatuiColor::Gray,
        CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
        CrosstermColor::Red => RatatuiColor::LightRed,
        CrosstermColor::Green => RatatuiColor::LightGreen,
        CrosstermColor::Yellow => RatatuiColor::LightYellow,
        CrosstermColor::Blue => RatatuiColor::LightBlue,
        CrosstermColor::Magenta => RatatuiColor::LightMagenta,
        CrosstermColor::Cyan => RatatuiColor::LightCyan,
        CrosstermColor::White => RatatuiColor::White,
        CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
        CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
        _ => RatatuiColor::White,
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                normal: ColorPair::new(CrosstermColor::White),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                boundary: ColorPair::new(CrosstermColor::DarkCyan),
                preview: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 40, g: 40, b: 60 }),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                range_edge: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Blue),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                cursor: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 70, g: 70, b: 70 }),

                header: ColorPair::new(CrosstermColor::DarkCyan),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),
                help_text: ColorPair::new(CrosstermColor::DarkCyan),

                info: ColorPair::new(CrosstermColor::Cyan),
                success: ColorPair::new(CrosstermColor::Green),
                warning: ColorPair::new(CrosstermColor::Yellow),
                error: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                normal: ColorPair::new(CrosstermColor::Black),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                boundary: ColorPair::new(CrosstermColor::DarkBlue),
                preview: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Rgb { r: 220, g: 220, b: 240 }),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Blue),
                range_edge: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                disabled: ColorPair::new(CrosstermColor::Grey),
                cursor: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Rgb { r: 200, g: 200, b: 200 }),

                header: ColorPair::new(CrosstermColor::DarkBlue),
                weekend: ColorPair::new(CrosstermColor::Grey),
                help_text: ColorPair::new(CrosstermColor::DarkBlue),

                info: ColorPair::new(CrosstermColor::DarkBlue),
                success: ColorPair::new(CrosstermColor::DarkGreen),
                warning: ColorPair::new(CrosstermColor::DarkYellow),
                error: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                normal: ColorPair::new(CrosstermColor::White),
                today: ColorPair::new(CrosstermColor::White),
                boundary: ColorPair::new(CrosstermColor::White),
                preview: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 28, g: 28, b: 28 }),
                in_range: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Grey),
                range_edge: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                cursor: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkGrey),

                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),
                help_text: ColorPair::new(CrosstermColor::Grey),

                info: ColorPair::new(CrosstermColor::White),
                success: ColorPair::new(CrosstermColor::White),
                warning: ColorPair::new(CrosstermColor::White),
                error: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }

    pub fn cell_colors(&self, variant: CellVariant) -> &ColorPair {
        match variant {
            CellVariant::Blank | CellVariant::Normal => &self.colors.normal,
            CellVariant::Today => &self.colors.today,
            CellVariant::Boundary => &self.colors.boundary,
            CellVariant::Preview => &self.colors.preview,
            CellVariant::InRange => &self.colors.in_range,
            CellVariant::RangeEdge => &self.colors.range_edge,
            CellVariant::Disabled => &self.colors.disabled,
        }
    }

    pub fn cell_style(&self, variant: CellVariant) -> RatatuiStyle {
        let colors = self.cell_colors(variant);
        match variant {
            CellVariant::RangeEdge | CellVariant::Today => {
                colors.to_ratatui_with_modifier(Modifier::BOLD)
            }
            CellVariant::Boundary => colors.to_ratatui_with_modifier(Modifier::UNDERLINED),
            _ => colors.to_ratatui(),
        }
    }

    pub fn notification_colors(&self, kind: NotificationKind) -> &ColorPair {
        match kind {
            NotificationKind::Info => &self.colors.info,
            NotificationKind::Success => &self.colors.success,
            NotificationKind::Warning => &self.colors.warning,
            NotificationKind::Error => &self.colors.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("minimal").name, "Minimal");
        assert_eq!(Theme::by_name("neon").name, "Dark");
        assert_eq!(Theme::available_themes().len(), 3);
    }

    #[test]
    fn test_range_edges_are_bold() {
        let theme = Theme::dark();
        let style = theme.cell_style(CellVariant::RangeEdge);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.bg, Some(RatatuiColor::LightBlue));
        assert!(!theme.cell_style(CellVariant::Disabled).add_modifier.contains(Modifier::BOLD));
    }
}
