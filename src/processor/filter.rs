use crate::error::WeatherError;
use crate::types::record::DerivedRecord;
use crate::types::season::Season;
use crate::types::traits::any::any_date::AnyDate;
use bon::Builder;
use chrono::NaiveDate;

/// Selects records by an inclusive date range and/or a set of seasons.
///
/// Every constraint is optional; an unset bound or an empty season list does
/// not restrict anything, so `RecordFilter::default()` keeps every record.
///
/// ```rust
/// use weather_dashboard::{RecordFilter, Season};
/// use chrono::NaiveDate;
///
/// let filter = RecordFilter::builder()
///     .start(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
///     .seasons(vec![Season::Summer, Season::Fall])
///     .build();
/// assert_eq!(filter.seasons(), &[Season::Summer, Season::Fall]);
/// assert!(filter.end().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct RecordFilter {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    #[builder(default)]
    seasons: Vec<Season>,
}

impl RecordFilter {
    /// A filter keeping every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter on `start..=end`, where both ends may be any date-like value.
    ///
    /// The start of `start`'s span and the end of `end`'s span are used, so
    /// `date_range(Year(2023), Year(2023))` covers the whole year.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InvalidParameter`] if either end cannot be resolved or
    /// the range ends before it starts.
    pub fn date_range(start: impl AnyDate, end: impl AnyDate) -> Result<Self, WeatherError> {
        let start = start
            .get_date_range()
            .ok_or_else(|| WeatherError::InvalidParameter("unresolvable start date".to_string()))?
            .start;
        let end = end
            .get_date_range()
            .ok_or_else(|| WeatherError::InvalidParameter("unresolvable end date".to_string()))?
            .end;
        if start > end {
            return Err(WeatherError::InvalidParameter(format!(
                "date range starts on {} after it ends on {}",
                start, end
            )));
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
            seasons: Vec::new(),
        })
    }

    /// Returns this filter restricted to `seasons`.
    pub fn with_seasons(mut self, seasons: impl IntoIterator<Item = Season>) -> Self {
        self.seasons = seasons.into_iter().collect();
        self
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn is_unrestricted(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.seasons.is_empty()
    }

    pub fn matches(&self, record: &DerivedRecord) -> bool {
        let date = record.date();
        self.start.map_or(true, |start| date >= start)
            && self.end.map_or(true, |end| date <= end)
            && (self.seasons.is_empty() || self.seasons.contains(&record.season()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{derive, generate, DerivedTable, Month, Year};

    fn table() -> Result<DerivedTable, WeatherError> {
        derive(generate(2023, Some(17))?)
    }

    #[test]
    fn test_unrestricted_filter_keeps_everything() -> Result<(), WeatherError> {
        let table = table()?;
        assert!(RecordFilter::all().is_unrestricted());
        assert_eq!(table.filter(&RecordFilter::all()), table);
        Ok(())
    }

    #[test]
    fn test_inclusive_date_range() -> Result<(), WeatherError> {
        let table = table()?;
        let filter = RecordFilter::date_range("2023-03-01", "2023-03-07")?;
        let week = table.filter(&filter);
        assert_eq!(week.len(), 7);
        assert_eq!(week.first_date(), NaiveDate::from_ymd_opt(2023, 3, 1));
        assert_eq!(week.last_date(), NaiveDate::from_ymd_opt(2023, 3, 7));
        Ok(())
    }

    #[test]
    fn test_month_range_spans_whole_months() -> Result<(), WeatherError> {
        let table = table()?;
        let filter = RecordFilter::date_range(Month::new(1, 2023), Month::new(2, 2023))?;
        assert_eq!(table.filter(&filter).len(), 31 + 28);
        Ok(())
    }

    #[test]
    fn test_date_range_and_season_combine() -> Result<(), WeatherError> {
        let table = table()?;
        let filter =
            RecordFilter::date_range(Year(2023), Year(2023))?.with_seasons([Season::Winter]);
        let winter = table.filter(&filter);
        assert_eq!(winter.len(), 90);

        let early = RecordFilter::builder()
            .end(NaiveDate::from_ymd_opt(2023, 1, 10).unwrap())
            .seasons(vec![Season::Winter])
            .build();
        assert_eq!(table.filter(&early).len(), 10);
        Ok(())
    }

    #[test]
    fn test_filtered_order_is_preserved() -> Result<(), WeatherError> {
        let table = table()?;
        let filter = RecordFilter::all().with_seasons([Season::Fall, Season::Spring]);
        let view = table.filter(&filter);
        assert_eq!(view.len(), 92 + 91);
        for pair in view.records().windows(2) {
            assert!(pair[0].date() < pair[1].date());
        }
        Ok(())
    }

    #[test]
    fn test_rejects_reversed_or_unresolvable_range() {
        assert!(matches!(
            RecordFilter::date_range("2023-05-01", "2023-04-01"),
            Err(WeatherError::InvalidParameter(_))
        ));
        assert!(matches!(
            RecordFilter::date_range("tomorrow", "2023-04-01"),
            Err(WeatherError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_range_outside_table_is_empty() -> Result<(), WeatherError> {
        let filter = RecordFilter::date_range(Year(2030), Year(2030))?;
        assert!(table()?.filter(&filter).is_empty());
        Ok(())
    }
}
