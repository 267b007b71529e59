use crate::error::WeatherError;
use crate::processor::comfort::comfort_index;
use crate::processor::statistics::population_mean_std;
use crate::processor::table::{DerivedTable, TableSource};
use crate::types::record::{DailyRecord, DerivedRecord, ExtremeFlags};
use log::{info, warn};

/// A value counts as extreme when it lies strictly more than this many
/// population standard deviations away from its table mean.
pub const EXTREME_STD_DEVS: f64 = 2.0;

/// Derives the comfort index and extreme flags for externally supplied records.
///
/// See [`derive_from`].
pub fn derive(records: Vec<DailyRecord>) -> Result<DerivedTable, WeatherError> {
    derive_from(records, TableSource::Supplied)
}

/// Builds an immutable [`DerivedTable`] from daily records.
///
/// Records are sorted by date. Gaps between dates are accepted (and logged);
/// duplicate dates are not.
///
/// # Errors
///
/// Returns [`WeatherError::MalformedInput`] on a duplicate date, a non-finite
/// value, humidity outside [0, 100] or negative rainfall.
pub fn derive_from(
    mut records: Vec<DailyRecord>,
    source: TableSource,
) -> Result<DerivedTable, WeatherError> {
    if let Some(message) = records.iter().find_map(DailyRecord::invalid_value) {
        return Err(WeatherError::MalformedInput(message));
    }

    records.sort_by_key(|r| r.date);
    let mut gaps = 0usize;
    for pair in records.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(WeatherError::MalformedInput(format!(
                "duplicate record for {}",
                pair[0].date
            )));
        }
        if pair[0].date.succ_opt() != Some(pair[1].date) {
            gaps += 1;
        }
    }
    if gaps > 0 {
        warn!(
            "{} gap(s) between consecutive dates in {} records from {:?}",
            gaps,
            records.len(),
            source
        );
    }

    let temperature = ExtremeBand::of(records.iter().map(|r| r.temperature));
    let humidity = ExtremeBand::of(records.iter().map(|r| r.humidity));
    let rainfall = ExtremeBand::of(records.iter().map(|r| r.rainfall));

    let derived: Vec<DerivedRecord> = records
        .into_iter()
        .map(|record| DerivedRecord {
            record,
            comfort_index: comfort_index(record.temperature, record.humidity),
            extremes: ExtremeFlags {
                temperature: temperature.is_extreme(record.temperature),
                humidity: humidity.is_extreme(record.humidity),
                rainfall: rainfall.is_extreme(record.rainfall),
            },
        })
        .collect();

    info!("Derived table with {} records from {:?}", derived.len(), source);
    Ok(DerivedTable::new(derived, source))
}

/// Values outside `mean ± EXTREME_STD_DEVS * std` of one metric.
struct ExtremeBand {
    low: f64,
    high: f64,
}

impl ExtremeBand {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        match population_mean_std(values) {
            Some((mean, std)) => Self {
                low: mean - EXTREME_STD_DEVS * std,
                high: mean + EXTREME_STD_DEVS * std,
            },
            None => Self {
                low: f64::NEG_INFINITY,
                high: f64::INFINITY,
            },
        }
    }

    fn is_extreme(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}
