//! The immutable derived table and its Polars representation.

use crate::error::WeatherError;
use crate::processor::filter::RecordFilter;
use crate::types::metric::Metric;
use crate::types::record::{DailyRecord, DerivedRecord};
use crate::types::weather_frame::WeatherLazyFrame;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// Where the records of a [`DerivedTable`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableSource {
    /// Synthesized by the generator.
    Generated { year: i32, seed: u64 },
    /// Loaded from a CSV file.
    File(PathBuf),
    /// Handed to [`crate::derive`] directly.
    Supplied,
}

/// Daily records with their derived columns, ordered by date.
///
/// A table is never mutated after [`crate::derive`] builds it. Filtering
/// returns a new table that shares no state with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTable {
    records: Vec<DerivedRecord>,
    source: TableSource,
}

impl DerivedTable {
    pub(crate) fn new(records: Vec<DerivedRecord>, source: TableSource) -> Self {
        Self { records, source }
    }

    pub fn records(&self) -> &[DerivedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DerivedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(DerivedRecord::date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(DerivedRecord::date)
    }

    /// The observed values without derived columns.
    pub fn daily_records(&self) -> Vec<DailyRecord> {
        self.records.iter().map(|r| r.record).collect()
    }

    /// All values of `metric`, in date order.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| metric.value_of(r)).collect()
    }

    /// Returns the records matching `filter` as a new table, in date order.
    ///
    /// ```rust
    /// use weather_dashboard::{derive, generate, RecordFilter, Season};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let table = derive(generate(2023, Some(1))?)?;
    /// let summer = table.filter(&RecordFilter::builder().seasons(vec![Season::Summer]).build());
    /// assert_eq!(summer.len(), 92);
    /// assert_eq!(table.len(), 365);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, filter: &RecordFilter) -> DerivedTable {
        let records: Vec<DerivedRecord> = self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .copied()
            .collect();
        debug!(
            "Filter {:?} kept {} of {} records",
            filter,
            records.len(),
            self.records.len()
        );
        DerivedTable::new(records, self.source.clone())
    }

    /// Builds a Polars `DataFrame` with one row per record.
    ///
    /// Columns: `date`, `temperature`, `humidity`, `rainfall`, `month`,
    /// `month_name`, `season`, `comfort_index`, `is_extreme_temperature`,
    /// `is_extreme_humidity`, `is_extreme_rainfall`.
    pub fn to_frame(&self) -> Result<DataFrame, WeatherError> {
        // NaiveDate::default() is 1970-01-01, the epoch of Polars' Date type
        let epoch = NaiveDate::default();
        let days: Vec<i32> = self
            .records
            .iter()
            .map(|r| (r.date() - epoch).num_days() as i32)
            .collect();
        let months: Vec<u32> = self.records.iter().map(DerivedRecord::month).collect();
        let month_names: Vec<&str> = self.records.iter().map(DerivedRecord::month_name).collect();
        let seasons: Vec<&str> = self.records.iter().map(|r| r.season().as_str()).collect();
        let flags = |pick: fn(&DerivedRecord) -> bool| -> Vec<bool> {
            self.records.iter().map(pick).collect()
        };

        let columns = vec![
            Column::new("date".into(), days).cast(&DataType::Date)?,
            Column::new("temperature".into(), self.values(Metric::Temperature)),
            Column::new("humidity".into(), self.values(Metric::Humidity)),
            Column::new("rainfall".into(), self.values(Metric::Rainfall)),
            Column::new("month".into(), months),
            Column::new("month_name".into(), month_names),
            Column::new("season".into(), seasons),
            Column::new("comfort_index".into(), self.values(Metric::ComfortIndex)),
            Column::new(
                "is_extreme_temperature".into(),
                flags(|r| r.extremes.temperature),
            ),
            Column::new("is_extreme_humidity".into(), flags(|r| r.extremes.humidity)),
            Column::new("is_extreme_rainfall".into(), flags(|r| r.extremes.rainfall)),
        ];
        Ok(DataFrame::new(columns)?)
    }

    /// A lazy Polars view of [`DerivedTable::to_frame`].
    pub fn lazy(&self) -> Result<WeatherLazyFrame, WeatherError> {
        Ok(WeatherLazyFrame::new(self.to_frame()?.lazy()))
    }
}

impl<'a> IntoIterator for &'a DerivedTable {
    type Item = &'a DerivedRecord;
    type IntoIter = std::slice::Iter<'a, DerivedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{derive, generate, Metric, RecordFilter, Season};
    use chrono::NaiveDate;

    #[test]
    fn test_filter_does_not_touch_source() -> Result<(), Box<dyn std::error::Error>> {
        let table = derive(generate(2023, Some(5))?)?;
        let before = table.clone();

        let winter = table.filter(&RecordFilter::builder().seasons(vec![Season::Winter]).build());
        assert_eq!(winter.len(), 90);
        assert_eq!(table, before);
        Ok(())
    }

    #[test]
    fn test_summer_scenario_2023() -> Result<(), Box<dyn std::error::Error>> {
        let table = derive(generate(2023, Some(2023))?)?;
        assert_eq!(table.len(), 365);

        let summer = table.filter(&RecordFilter::builder().seasons(vec![Season::Summer]).build());
        assert_eq!(summer.len(), 92);
        assert!(summer.iter().all(|r| (6..=8).contains(&r.month())));
        assert_eq!(
            summer.first_date(),
            NaiveDate::from_ymd_opt(2023, 6, 1)
        );
        assert_eq!(
            summer.last_date(),
            NaiveDate::from_ymd_opt(2023, 8, 31)
        );

        let winter = table.filter(&RecordFilter::builder().seasons(vec![Season::Winter]).build());
        let mean = |values: Vec<f64>| values.iter().sum::<f64>() / values.len() as f64;
        assert!(mean(summer.values(Metric::Temperature)) > mean(winter.values(Metric::Temperature)));
        Ok(())
    }

    #[test]
    fn test_to_frame_matches_records() -> Result<(), Box<dyn std::error::Error>> {
        let table = derive(generate(2024, Some(8))?)?;
        let df = table.to_frame()?;
        assert_eq!(df.height(), 366);
        assert_eq!(df.width(), 11);

        let temperature = df.column("temperature")?.f64()?;
        let seasons = df.column("season")?.str()?;
        for (i, record) in table.iter().enumerate() {
            assert_eq!(temperature.get(i), Some(record.temperature()));
            assert_eq!(seasons.get(i), Some(record.season().as_str()));
        }
        Ok(())
    }

    #[test]
    fn test_empty_table_frame() -> Result<(), Box<dyn std::error::Error>> {
        let table = derive(Vec::new())?;
        let df = table.to_frame()?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 11);
        Ok(())
    }
}
