use crate::domain::{Bounds, CalendarDate, DateParseError, DateRange};
use serde::{Deserialize, Serialize};

/// Caller-facing inputs, as ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerProps {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedProps {
    pub range: Option<DateRange>,
    pub bounds: Bounds,
}

impl PickerProps {
    /// Parse into typed values. A missing `min_date` means `today`; an
    /// `end_date` without a `start_date` is ignored.
    pub fn resolve(&self, today: CalendarDate) -> Result<ResolvedProps, DateParseError> {
        let min = parse_optional(self.min_date.as_deref())?.unwrap_or(today);
        let max = parse_optional(self.max_date.as_deref())?;

        let start = parse_optional(self.start_date.as_deref())?;
        let end = parse_optional(self.end_date.as_deref())?;
        let range = start.map(|start| DateRange::new(start, end.unwrap_or(start)));

        Ok(ResolvedProps {
            range,
            bounds: Bounds::new(min, max),
        })
    }
}

fn parse_optional(value: Option<&str>) -> Result<Option<CalendarDate>, DateParseError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => CalendarDate::parse(s).map(Some),
    }
}
