use std::fmt;

use time::{Date, Duration, Month, macros::format_description};

use crate::{Error, Result};

/// Number of days shown by a month grid: six full Sunday-start weeks.
pub const MONTH_GRID_DAYS: i64 = 42;

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<Date> {
    let value = value.trim();

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(value.to_owned()))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Every date from `start` to `end`, both inclusive.
pub fn days(start: Date, end: Date) -> impl Iterator<Item = Date> {
    std::iter::successors(Some(start), |day| day.next_day()).take_while(move |day| *day <= end)
}

/// Inclusive range covered by the dashboard month view.
///
/// The grid starts on the Sunday on or before the first of the month and
/// spans [`MONTH_GRID_DAYS`] days, so leading and trailing days of the
/// neighbouring months are included.
pub fn month_grid(year: i32, month: Month) -> Result<(Date, Date)> {
    let first = Date::from_calendar_date(year, month, 1)
        .map_err(|_| Error::InvalidDate(format!("{year:04}-{:02}-01", u8::from(month))))?;
    let start = WeekKey::of(first).start();
    let end = start.saturating_add(Duration::days(MONTH_GRID_DAYS - 1));

    Ok((start, end))
}

/// Whole Sunday-start weeks covering an inclusive range.
pub fn week_span(start: Date, end: Date) -> (Date, Date) {
    (WeekKey::of(start).start(), WeekKey::of(end).end())
}

/// Sunday-start week a date belongs to, identified by that Sunday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey(Date);

impl WeekKey {
    pub fn of(date: Date) -> Self {
        let offset = date.weekday().number_days_from_sunday();

        Self(date.saturating_sub(Duration::days(offset.into())))
    }

    pub fn start(&self) -> Date {
        self.0
    }

    pub fn end(&self) -> Date {
        self.0.saturating_add(Duration::days(6))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week of {}", format_date(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Weekday, macros::date};

    #[test]
    fn parse_and_format_round_trip() {
        let date = parse_date(" 2024-06-03 ").unwrap();
        assert_eq!(date, date!(2024 - 06 - 03));
        assert_eq!(format_date(date), "2024-06-03");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_date("03/06/2024"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn week_key_is_previous_sunday() {
        // 2024-06-03 is a Monday
        assert_eq!(WeekKey::of(date!(2024 - 06 - 03)).start(), date!(2024 - 06 - 02));
        assert_eq!(WeekKey::of(date!(2024 - 06 - 02)).start(), date!(2024 - 06 - 02));
        assert_eq!(WeekKey::of(date!(2024 - 06 - 08)).start(), date!(2024 - 06 - 02));
        assert_eq!(WeekKey::of(date!(2024 - 06 - 09)).start(), date!(2024 - 06 - 09));
        assert_eq!(WeekKey::of(date!(2024 - 06 - 03)).end(), date!(2024 - 06 - 08));
    }

    #[test]
    fn week_key_spans_year_boundary() {
        // Tuesday 2024-12-31 and Wednesday 2025-01-01 share a week
        assert_eq!(
            WeekKey::of(date!(2024 - 12 - 31)),
            WeekKey::of(date!(2025 - 01 - 01))
        );
    }

    #[test]
    fn week_span_widens_to_whole_weeks() {
        assert_eq!(
            week_span(date!(2024 - 06 - 04), date!(2024 - 06 - 12)),
            (date!(2024 - 06 - 02), date!(2024 - 06 - 15))
        );
        assert_eq!(
            week_span(date!(2024 - 06 - 02), date!(2024 - 06 - 08)),
            (date!(2024 - 06 - 02), date!(2024 - 06 - 08))
        );
    }

    #[test]
    fn month_grid_covers_whole_weeks() {
        let (start, end) = month_grid(2024, Month::June).unwrap();

        assert_eq!(start, date!(2024 - 05 - 26));
        assert_eq!(start.weekday(), Weekday::Sunday);
        assert_eq!(end.weekday(), Weekday::Saturday);
        assert_eq!(days(start, end).count(), 42);
        assert!(end >= date!(2024 - 06 - 30));
    }

    #[test]
    fn days_is_inclusive_and_empty_when_inverted() {
        let all = days(date!(2024 - 06 - 29), date!(2024 - 07 - 01)).collect::<Vec<_>>();
        assert_eq!(
            all,
            vec![date!(2024 - 06 - 29), date!(2024 - 06 - 30), date!(2024 - 07 - 01)]
        );
        assert_eq!(days(date!(2024 - 07 - 01), date!(2024 - 06 - 29)).count(), 0);
    }
}
