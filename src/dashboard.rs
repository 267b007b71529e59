//! Ready-to-render views over a [`DerivedTable`]: headline metrics, record
//! days, a single-metric time series and the comfort index view.

use crate::error::WeatherError;
use crate::processor::statistics::RAINY_DAY_THRESHOLD_MM;
use crate::processor::table::DerivedTable;
use crate::types::metric::Metric;
use crate::types::record::DerivedRecord;
use crate::types::season::Season;
use chrono::NaiveDate;
use polars::prelude::{ChunkAgg, Float64Chunked};
use serde::Serialize;

/// Headline numbers of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub count: usize,
    pub mean_temperature: Option<f64>,
    pub mean_humidity: Option<f64>,
    pub mean_rainfall: Option<f64>,
    /// Days with more than [`RAINY_DAY_THRESHOLD_MM`] of rain.
    pub rainy_days: usize,
    /// Days flagged extreme in at least one metric.
    pub extreme_days: usize,
}

/// The single most extreme day for each observed metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeDays {
    pub hottest: DerivedRecord,
    pub coldest: DerivedRecord,
    pub wettest: DerivedRecord,
    pub most_humid: DerivedRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    /// Trailing mean, present once the rolling window is full.
    pub rolling: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortPoint {
    pub date: NaiveDate,
    pub season: Season,
    pub comfort_index: f64,
}

/// Daily comfort values plus their mean per season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortView {
    pub daily: Vec<ComfortPoint>,
    pub by_season: Vec<(Season, f64)>,
}

impl DerivedTable {
    pub fn key_metrics(&self) -> KeyMetrics {
        let mean = |metric: Metric| {
            Float64Chunked::from_vec(metric.column_name().into(), self.values(metric)).mean()
        };
        KeyMetrics {
            count: self.len(),
            mean_temperature: mean(Metric::Temperature),
            mean_humidity: mean(Metric::Humidity),
            mean_rainfall: mean(Metric::Rainfall),
            rainy_days: self.rainy_days(RAINY_DAY_THRESHOLD_MM),
            extreme_days: self.iter().filter(|r| r.extremes.any()).count(),
        }
    }

    /// Hottest, coldest, wettest and most humid day. The earliest date wins a tie.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InsufficientData`] on an empty table.
    pub fn extreme_days(&self) -> Result<ExtremeDays, WeatherError> {
        let pick = |metric: Metric, highest: bool| -> Result<DerivedRecord, WeatherError> {
            // records are in date order, so only a strictly better value replaces the pick
            self.iter()
                .fold(None::<&DerivedRecord>, |best, record| match best {
                    Some(b) => {
                        let (value, current) = (metric.value_of(record), metric.value_of(b));
                        let better = if highest { value > current } else { value < current };
                        Some(if better { record } else { b })
                    }
                    None => Some(record),
                })
                .copied()
                .ok_or_else(|| WeatherError::insufficient("extreme days", 1, self.len()))
        };

        Ok(ExtremeDays {
            hottest: pick(Metric::Temperature, true)?,
            coldest: pick(Metric::Temperature, false)?,
            wettest: pick(Metric::Rainfall, true)?,
            most_humid: pick(Metric::Humidity, true)?,
        })
    }

    /// The values of `metric` by date, optionally with a trailing rolling mean.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InvalidParameter`] for a rolling window of zero.
    pub fn time_series(
        &self,
        metric: Metric,
        rolling_window: Option<usize>,
    ) -> Result<Vec<TimeSeriesPoint>, WeatherError> {
        let rolling = match rolling_window {
            Some(window) => self.rolling_mean(metric, window)?,
            None => vec![None; self.len()],
        };
        Ok(self
            .iter()
            .zip(rolling)
            .map(|(record, rolling)| TimeSeriesPoint {
                date: record.date(),
                value: metric.value_of(record),
                rolling,
            })
            .collect())
    }

    pub fn comfort_view(&self) -> Result<ComfortView, WeatherError> {
        let daily = self
            .iter()
            .map(|r| ComfortPoint {
                date: r.date(),
                season: r.season(),
                comfort_index: r.comfort_index,
            })
            .collect();
        let by_season = self
            .seasonal_aggregate()?
            .iter()
            .map(|a| (a.season, a.mean_comfort_index))
            .collect();
        Ok(ComfortView { daily, by_season })
    }
}
