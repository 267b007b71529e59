use chrono::{Datelike, Duration, NaiveDate};

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}

pub(crate) fn days_in_year(year: i32) -> Option<u32> {
    let last_day = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(last_day.ordinal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_handles_leap_february() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 13), None);
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2023), Some(365));
        assert_eq!(days_in_year(2024), Some(366));
        assert_eq!(days_in_year(1900), Some(365));
        assert_eq!(days_in_year(2000), Some(366));
    }
}
