//! Calendar fields derived from a date. These are never stored on a record;
//! every accessor recomputes them from the date so they cannot go stale.

use crate::types::season::Season;
use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month number of `date`, 1 through 12.
pub fn month_of(date: NaiveDate) -> u32 {
    date.month()
}

/// English name of a month number, or `None` outside 1-12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// English name of the month `date` falls in.
pub fn month_name_of(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Season `date` falls in.
pub fn season_of(date: NaiveDate) -> Season {
    match Season::from_month(date.month()) {
        Some(season) => season,
        // a NaiveDate month is always within 1..=12
        None => Season::Fall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_calendar_fields_agree_with_season_table() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            assert_eq!(Season::from_month(month_of(date)), Some(season_of(date)));
            assert_eq!(month_name(month_of(date)), Some(month_name_of(date)));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_season_of_covers_each_season_month() {
        for season in Season::ALL {
            for month in season.months() {
                let first = NaiveDate::from_ymd_opt(2023, month, 1).unwrap();
                assert_eq!(season_of(first), season, "month {}", month);
            }
        }
        assert_eq!(season_of(NaiveDate::from_ymd_opt(2023, 11, 30).unwrap()), Season::Fall);
        assert_eq!(season_of(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()), Season::Winter);
    }
}
