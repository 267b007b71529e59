//! Descriptive statistics over a derived table: per-metric summaries,
//! correlation, rolling means and rainy-day counts.

use crate::error::WeatherError;
use crate::processor::table::DerivedTable;
use crate::types::metric::Metric;
use polars::lazy::dsl::pearson_corr;
use polars::prelude::*;
use serde::Serialize;

/// Rainfall above which a day counts as rainy, mm.
pub const RAINY_DAY_THRESHOLD_MM: f64 = 0.1;

/// Mean and population standard deviation, or `None` for an empty input.
pub(crate) fn population_mean_std(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let ca = Float64Chunked::from_vec("values".into(), values.collect());
    Some((ca.mean()?, ca.std(0)?))
}

/// Count, mean, sample standard deviation, min, median and max of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Pairwise Pearson correlations between metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    metrics: Vec<Metric>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Row-major correlation values, in the order of [`CorrelationMatrix::metrics`].
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// The correlation between two metrics, if both are part of the matrix.
    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let i = self.metrics.iter().position(|m| *m == a)?;
        let j = self.metrics.iter().position(|m| *m == b)?;
        Some(self.values[i][j])
    }
}

impl DerivedTable {
    /// Summarizes every metric in [`Metric::ALL`].
    ///
    /// The standard deviation uses the sample (n - 1) denominator.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InsufficientData`] for fewer than two records.
    pub fn summary_statistics(&self) -> Result<Vec<MetricSummary>, WeatherError> {
        const OPERATION: &str = "summary statistics";
        if self.len() < 2 {
            return Err(WeatherError::insufficient(OPERATION, 2, self.len()));
        }

        Metric::ALL
            .iter()
            .map(|&metric| -> Result<MetricSummary, WeatherError> {
                let ca = Float64Chunked::from_vec(metric.column_name().into(), self.values(metric));
                let missing = || WeatherError::insufficient(OPERATION, 2, ca.len());
                Ok(MetricSummary {
                    metric,
                    count: ca.len(),
                    mean: ca.mean().ok_or_else(missing)?,
                    std: ca.std(1).ok_or_else(missing)?,
                    min: ca.min().ok_or_else(missing)?,
                    median: ca.median().ok_or_else(missing)?,
                    max: ca.max().ok_or_else(missing)?,
                })
            })
            .collect()
    }

    /// Pearson correlation between every pair of `metrics`.
    ///
    /// Computed with Polars' `pearson_corr`. A metric with zero variance
    /// correlates as `NaN` with everything, itself included.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InsufficientData`] for fewer than two records and
    /// [`WeatherError::InvalidParameter`] for an empty metric list.
    pub fn correlation_matrix(&self, metrics: &[Metric]) -> Result<CorrelationMatrix, WeatherError> {
        if self.len() < 2 {
            return Err(WeatherError::insufficient("correlation", 2, self.len()));
        }
        if metrics.is_empty() {
            return Err(WeatherError::InvalidParameter(
                "correlation needs at least one metric".to_string(),
            ));
        }

        // positional names, so asking for the same metric twice still builds a frame
        let name = |i: usize| format!("m{}", i);
        let columns: Vec<Column> = metrics
            .iter()
            .enumerate()
            .map(|(i, &metric)| Column::new(name(i).into(), self.values(metric)))
            .collect();

        let n = metrics.len();
        let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect();
        let row = DataFrame::new(columns)?
            .lazy()
            .select(
                pairs
                    .iter()
                    .map(|&(i, j)| pearson_corr(col(name(i)), col(name(j))).alias(format!("c{}_{}", i, j)))
                    .collect::<Vec<_>>(),
            )
            .collect()?;

        let mut values = vec![vec![f64::NAN; n]; n];
        for (i, j) in pairs {
            let r = row
                .column(&format!("c{}_{}", i, j))?
                .f64()?
                .get(0)
                .unwrap_or(f64::NAN);
            // a zero-variance column stays NaN on the diagonal too
            let r = match (i == j, r.is_nan()) {
                (_, true) => f64::NAN,
                (true, false) => 1.0,
                (false, false) => r.clamp(-1.0, 1.0),
            };
            values[i][j] = r;
            values[j][i] = r;
        }

        Ok(CorrelationMatrix {
            metrics: metrics.to_vec(),
            values,
        })
    }

    /// Trailing mean of `metric` over `window` records, aligned with the records.
    ///
    /// The first `window - 1` entries are `None`.
    pub fn rolling_mean(&self, metric: Metric, window: usize) -> Result<Vec<Option<f64>>, WeatherError> {
        if window == 0 {
            return Err(WeatherError::InvalidParameter(
                "rolling window must be at least 1".to_string(),
            ));
        }
        let options = RollingOptionsFixedWindow {
            window_size: window,
            min_periods: window,
            ..Default::default()
        };
        let df = df!("value" => self.values(metric))?
            .lazy()
            .select([col("value").rolling_mean(options)])
            .collect()?;
        Ok(df.column("value")?.f64()?.into_iter().collect())
    }

    /// Number of records with rainfall strictly above `threshold_mm`.
    pub fn rainy_days(&self, threshold_mm: f64) -> usize {
        self.iter().filter(|r| r.rainfall() > threshold_mm).count()
    }
}
