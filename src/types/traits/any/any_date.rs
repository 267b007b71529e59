use crate::types::traits::types::{Month, StartEndDate, Year};
use crate::types::traits::utils::days_in_month;
use chrono::NaiveDate;

/// Anything that resolves to an inclusive span of calendar days.
///
/// Range filters take the `start` of the first argument's span and the `end`
/// of the second, so `Month(2023, 6)..Month(2023, 8)` covers June 1st through
/// August 31st.
pub trait AnyDate {
    fn get_date_range(self) -> Option<StartEndDate>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<StartEndDate> {
        NaiveDate::parse_from_str(self.trim(), "%Y-%m-%d")
            .ok()?
            .get_date_range()
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<StartEndDate> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<StartEndDate> {
        let year = self.year();
        let month = self.month();
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_resolves_to_single_day() {
        let range = "2023-07-04".get_date_range().unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        assert_eq!(range.start, expected);
        assert_eq!(range.end, expected);
    }

    #[test]
    fn test_invalid_str_does_not_resolve() {
        assert!("2023-02-30".get_date_range().is_none());
        assert!("yesterday".to_string().get_date_range().is_none());
    }

    #[test]
    fn test_month_covers_whole_month() {
        let range = Month::new(2, 2024).get_date_range().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_invalid_month_does_not_resolve() {
        assert!(Month::new(13, 2024).get_date_range().is_none());
    }
}
