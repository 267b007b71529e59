//! Monthly and seasonal aggregates, computed with Polars group-bys.

use crate::error::WeatherError;
use crate::processor::table::DerivedTable;
use crate::types::calendar::month_name;
use crate::types::season::Season;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One month of a monthly trend view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: u32,
    pub month_name: &'static str,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub total_rainfall: f64,
    pub mean_rainfall: f64,
    pub days: u32,
}

/// One season of a seasonal comparison view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAggregate {
    pub season: Season,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub mean_rainfall: f64,
    pub mean_comfort_index: f64,
    pub count: u32,
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T, WeatherError> {
    value.ok_or_else(|| {
        WeatherError::MalformedInput(format!(
            "aggregate column '{}' has no value in row {}",
            column, row
        ))
    })
}

impl DerivedTable {
    /// One row per month present in the table, ascending by month number.
    ///
    /// Temperature and humidity are averaged; rainfall is both summed and averaged.
    pub fn monthly_aggregate(&self) -> Result<Vec<MonthlyAggregate>, WeatherError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let df = self
            .lazy()?
            .frame
            .group_by([col("month")])
            .agg([
                col("temperature").mean().alias("mean_temperature"),
                col("humidity").mean().alias("mean_humidity"),
                col("rainfall").sum().alias("total_rainfall"),
                col("rainfall").mean().alias("mean_rainfall"),
                col("date").count().cast(DataType::UInt32).alias("days"),
            ])
            .sort(["month"], SortMultipleOptions::default())
            .collect()?;

        let months = df.column("month")?.u32()?;
        let mean_temperature = df.column("mean_temperature")?.f64()?;
        let mean_humidity = df.column("mean_humidity")?.f64()?;
        let total_rainfall = df.column("total_rainfall")?.f64()?;
        let mean_rainfall = df.column("mean_rainfall")?.f64()?;
        let days = df.column("days")?.u32()?;

        (0..df.height())
            .map(|i| -> Result<MonthlyAggregate, WeatherError> {
                let month = required(months.get(i), "month", i)?;
                Ok(MonthlyAggregate {
                    month,
                    month_name: required(month_name(month), "month", i)?,
                    mean_temperature: required(mean_temperature.get(i), "mean_temperature", i)?,
                    mean_humidity: required(mean_humidity.get(i), "mean_humidity", i)?,
                    total_rainfall: required(total_rainfall.get(i), "total_rainfall", i)?,
                    mean_rainfall: required(mean_rainfall.get(i), "mean_rainfall", i)?,
                    days: required(days.get(i), "days", i)?,
                })
            })
            .collect()
    }

    /// One row per season present in the table, in canonical season order.
    pub fn seasonal_aggregate(&self) -> Result<Vec<SeasonalAggregate>, WeatherError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let df = self
            .lazy()?
            .frame
            .group_by([col("season")])
            .agg([
                col("temperature").mean().alias("mean_temperature"),
                col("humidity").mean().alias("mean_humidity"),
                col("rainfall").mean().alias("mean_rainfall"),
                col("comfort_index").mean().alias("mean_comfort_index"),
                col("date").count().cast(DataType::UInt32).alias("count"),
            ])
            .collect()?;

        let seasons = df.column("season")?.str()?;
        let mean_temperature = df.column("mean_temperature")?.f64()?;
        let mean_humidity = df.column("mean_humidity")?.f64()?;
        let mean_rainfall = df.column("mean_rainfall")?.f64()?;
        let mean_comfort = df.column("mean_comfort_index")?.f64()?;
        let counts = df.column("count")?.u32()?;

        let mut aggregates = (0..df.height())
            .map(|i| -> Result<SeasonalAggregate, WeatherError> {
                Ok(SeasonalAggregate {
                    season: required(seasons.get(i), "season", i)?.parse()?,
                    mean_temperature: required(mean_temperature.get(i), "mean_temperature", i)?,
                    mean_humidity: required(mean_humidity.get(i), "mean_humidity", i)?,
                    mean_rainfall: required(mean_rainfall.get(i), "mean_rainfall", i)?,
                    mean_comfort_index: required(mean_comfort.get(i), "mean_comfort_index", i)?,
                    count: required(counts.get(i), "count", i)?,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;
        aggregates.sort_by_key(|a| a.season);
        Ok(aggregates)
    }

    /// [`DerivedTable::seasonal_aggregate`] keyed by season.
    pub fn seasonal_aggregate_map(&self) -> Result<BTreeMap<Season, SeasonalAggregate>, WeatherError> {
        Ok(self
            .seasonal_aggregate()?
            .into_iter()
            .map(|a| (a.season, a))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{derive, generate, RecordFilter};

    #[test]
    fn test_full_year_has_twelve_ordered_months() -> Result<(), WeatherError> {
        let table = derive(generate(2023, Some(44))?)?;
        let monthly = table.monthly_aggregate()?;

        assert_eq!(monthly.len(), 12);
        let months: Vec<u32> = monthly.iter().map(|m| m.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
        assert_eq!(monthly[0].month_name, "January");
        assert_eq!(monthly[1].days, 28);
        assert_eq!(monthly.iter().map(|m| m.days).sum::<u32>(), 365);
        Ok(())
    }

    #[test]
    fn test_weighted_monthly_means_match_annual_mean() -> Result<(), WeatherError> {
        let table = derive(generate(2024, Some(45))?)?;
        let monthly = table.monthly_aggregate()?;

        let weighted = monthly
            .iter()
            .map(|m| m.mean_temperature * m.days as f64)
            .sum::<f64>()
            / table.len() as f64;
        let temperatures = table.values(crate::Metric::Temperature);
        let annual = temperatures.iter().sum::<f64>() / temperatures.len() as f64;
        assert!((weighted - annual).abs() < 1e-9);

        let total_rain: f64 = monthly.iter().map(|m| m.total_rainfall).sum();
        let expected_rain: f64 = table.values(crate::Metric::Rainfall).iter().sum();
        assert!((total_rain - expected_rain).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_monthly_aggregate_of_partial_table() -> Result<(), WeatherError> {
        let table = derive(generate(2023, Some(46))?)?;
        let summer = table.filter(&RecordFilter::all().with_seasons([Season::Summer]));
        let monthly = summer.monthly_aggregate()?;
        let months: Vec<u32> = monthly.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![6, 7, 8]);
        Ok(())
    }

    #[test]
    fn test_seasonal_aggregate_order_and_counts() -> Result<(), WeatherError> {
        let table = derive(generate(2023, Some(47))?)?;
        let seasonal = table.seasonal_aggregate()?;

        let seasons: Vec<Season> = seasonal.iter().map(|s| s.season).collect();
        assert_eq!(seasons, Season::ALL.to_vec());
        let counts: Vec<u32> = seasonal.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![90, 92, 92, 91]);

        let by_season = table.seasonal_aggregate_map()?;
        assert!(
            by_season[&Season::Summer].mean_temperature
                > by_season[&Season::Winter].mean_temperature
        );
        Ok(())
    }

    #[test]
    fn test_empty_table_aggregates() -> Result<(), WeatherError> {
        let table = derive(Vec::new())?;
        assert!(table.monthly_aggregate()?.is_empty());
        assert!(table.seasonal_aggregate()?.is_empty());
        Ok(())
    }
}
