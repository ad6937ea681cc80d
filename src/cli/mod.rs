pub mod plan;
pub mod recipes;
pub mod shopping;

use mealboard_shared::mealplan::SlotKey;
use mealboard_shared::{month_grid, parse_date};
use time::{Date, OffsetDateTime};

pub fn parse_date_arg(value: &str) -> Result<Date, String> {
    parse_date(value).map_err(|e| e.to_string())
}

/// Slot id in its `YYYY-MM-DD|meal` text form.
pub fn parse_slot_arg(value: &str) -> Result<SlotKey, String> {
    value.parse::<SlotKey>().map_err(|e| e.to_string())
}

/// Local calendar date, UTC when the local offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Fills missing bounds from the month grid around the given bound, or
/// around `today` when neither is set.
pub fn resolve_range(
    start: Option<Date>,
    end: Option<Date>,
    today: Date,
) -> anyhow::Result<(Date, Date)> {
    let anchor = start.or(end).unwrap_or(today);
    let (grid_start, grid_end) = month_grid(anchor.year(), anchor.month())?;

    Ok((start.unwrap_or(grid_start), end.unwrap_or(grid_end)))
}
