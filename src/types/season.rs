//! Defines the `Season` enum, the fixed three-month grouping of the calendar year
//! used by filters and aggregate views.

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four meteorological seasons of the (northern hemisphere) year.
///
/// The mapping from month to season is fixed:
///
/// | Season | Months |
/// |--------|--------|
/// | Winter | December, January, February |
/// | Spring | March, April, May |
/// | Summer | June, July, August |
/// | Fall   | September, October, November |
///
/// Variants are declared in canonical display order, so the derived `Ord`
/// sorts seasons Winter, Spring, Summer, Fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in canonical order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Maps a month number (1-12) to its season.
    ///
    /// # Returns
    ///
    /// * `Some(Season)` for months 1 through 12.
    /// * `None` for any other value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weather_dashboard::Season;
    ///
    /// assert_eq!(Season::from_month(1), Some(Season::Winter));
    /// assert_eq!(Season::from_month(12), Some(Season::Winter));
    /// assert_eq!(Season::from_month(4), Some(Season::Spring));
    /// assert_eq!(Season::from_month(7), Some(Season::Summer));
    /// assert_eq!(Season::from_month(10), Some(Season::Fall));
    /// assert_eq!(Season::from_month(13), None);
    /// ```
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Fall),
            _ => None,
        }
    }

    /// The month numbers belonging to this season, in calendar order of the season.
    pub fn months(self) -> [u32; 3] {
        match self {
            Season::Winter => [12, 1, 2],
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Fall => [9, 10, 11],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            _ => Err(WeatherError::InvalidParameter(format!(
                "unrecognized season '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_month_table() {
        let expected = [
            (1, Season::Winter),
            (2, Season::Winter),
            (3, Season::Spring),
            (4, Season::Spring),
            (5, Season::Spring),
            (6, Season::Summer),
            (7, Season::Summer),
            (8, Season::Summer),
            (9, Season::Fall),
            (10, Season::Fall),
            (11, Season::Fall),
            (12, Season::Winter),
        ];
        for (month, season) in expected {
            assert_eq!(Season::from_month(month), Some(season), "month {}", month);
        }
        assert_eq!(Season::from_month(0), None);
    }

    #[test]
    fn test_months_round_trip() {
        for season in Season::ALL {
            for month in season.months() {
                assert_eq!(Season::from_month(month), Some(season));
            }
        }
    }

    #[test]
    fn test_parse_season_names() -> Result<(), WeatherError> {
        assert_eq!("Summer".parse::<Season>()?, Season::Summer);
        assert_eq!(" winter ".parse::<Season>()?, Season::Winter);
        assert_eq!("Autumn".parse::<Season>()?, Season::Fall);
        assert!(matches!(
            "monsoon".parse::<Season>(),
            Err(WeatherError::InvalidParameter(_))
        ));
        Ok(())
    }

    #[test]
    fn test_canonical_ordering() {
        let mut seasons = vec![Season::Fall, Season::Winter, Season::Summer, Season::Spring];
        seasons.sort();
        assert_eq!(seasons, Season::ALL.to_vec());
    }
}
