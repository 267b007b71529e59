// weather_frame.rs

//! Contains the `WeatherLazyFrame` structure for lazy Polars operations on a derived weather table.

use crate::types::season::Season;
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::period::date_period::DatePeriod;
use crate::WeatherError;
use polars::prelude::{col, lit, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding a derived weather table.
///
/// The frame has the columns `date` (Date), `temperature`, `humidity`,
/// `rainfall`, `comfort_index` (Float64), `month` (UInt32), `month_name`,
/// `season` (String) and the boolean `is_extreme_temperature`,
/// `is_extreme_humidity` and `is_extreme_rainfall`.
///
/// Instances are obtained via [`crate::DerivedTable::lazy`]. Every method returns a
/// *new* frame; nothing is computed until `.collect()` is called on
/// [`WeatherLazyFrame::frame`].
///
/// # Errors
///
/// Collecting can return a [`polars::prelude::PolarsError`]. Methods that resolve
/// date-like arguments return [`WeatherError::DateParsingError`] when the input
/// cannot be resolved.
#[derive(Clone)]
pub struct WeatherLazyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl WeatherLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Filters the rows based on a Polars predicate expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weather_dashboard::{derive, generate};
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let table = derive(generate(2023, Some(11))?)?;
    /// let wet_days = table.lazy()?.filter(col("rainfall").gt(lit(0.0f64)));
    /// let df = wet_days.frame.collect()?;
    /// assert!(df.height() < 365);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> WeatherLazyFrame {
        WeatherLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps only the rows whose date lies within `start..=end`.
    ///
    /// The start of `start`'s span and the end of `end`'s span are used, so
    /// `get_range(Month::new(6, 2023), Month::new(8, 2023))` covers the whole summer.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::DateParsingError`] if `start` or `end` cannot be resolved.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<WeatherLazyFrame, WeatherError> {
        let start_naive = start
            .get_date_range()
            .ok_or(WeatherError::DateParsingError)?
            .start;
        let end_naive = end
            .get_date_range()
            .ok_or(WeatherError::DateParsingError)?
            .end;

        Ok(self.filter(
            col("date")
                .gt_eq(lit(start_naive))
                .and(col("date").lt_eq(lit(end_naive))),
        ))
    }

    /// Keeps the row for a single day. If `date` spans several days, its first day is used.
    pub fn get_at(&self, date: impl AnyDate) -> Result<WeatherLazyFrame, WeatherError> {
        let naive_date = date
            .get_date_range()
            .ok_or(WeatherError::DateParsingError)?
            .start;
        Ok(self.filter(col("date").eq(lit(naive_date))))
    }

    /// Keeps the rows within a period such as a [`crate::Year`] or [`crate::Month`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use weather_dashboard::{derive, generate, Month};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let table = derive(generate(2024, Some(3))?)?;
    /// let february = table.lazy()?.get_for_period(Month::new(2, 2024))?;
    /// assert_eq!(february.frame.collect()?.height(), 29);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_for_period(
        &self,
        period: impl DatePeriod,
    ) -> Result<WeatherLazyFrame, WeatherError> {
        let date_period = period
            .get_date_period()
            .ok_or(WeatherError::DateParsingError)?;
        self.get_range(date_period.start, date_period.end)
    }

    /// Keeps the rows belonging to any of `seasons`. An empty slice keeps every row.
    pub fn get_seasons(&self, seasons: &[Season]) -> WeatherLazyFrame {
        let predicate = seasons
            .iter()
            .map(|season| col("season").eq(lit(season.as_str())))
            .reduce(|acc, next| acc.or(next));
        match predicate {
            Some(predicate) => self.filter(predicate),
            None => self.clone(),
        }
    }
}
