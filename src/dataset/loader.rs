//! Loading daily records from CSV files.

use crate::dataset::error::DatasetError;
use crate::error::WeatherError;
use crate::types::record::DailyRecord;
use chrono::NaiveDate;
use log::info;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn column_as(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column, WeatherError> {
    df.column(name)
        .map_err(|_| WeatherError::MalformedInput(format!("missing column '{}'", name)))?
        .cast(dtype)
        .map_err(WeatherError::from)
}

/// Reads daily records from a CSV file with a header row.
///
/// The header must contain `date`, `temperature`, `humidity` and `rainfall`;
/// other columns are ignored. Dates use the `YYYY-MM-DD` form. Records are
/// returned in file order.
///
/// # Errors
///
/// [`WeatherError::Dataset`] when the file cannot be read as CSV, and
/// [`WeatherError::MalformedInput`] for a missing column, an empty cell, an
/// unparseable date or number, a duplicate date or an out-of-range value.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<DailyRecord>, WeatherError> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?;

    let dates = column_as(&df, "date", &DataType::String)?;
    let temperature = column_as(&df, "temperature", &DataType::Float64)?;
    let humidity = column_as(&df, "humidity", &DataType::Float64)?;
    let rainfall = column_as(&df, "rainfall", &DataType::Float64)?;
    let (dates, temperature, humidity, rainfall) = (
        dates.str()?,
        temperature.f64()?,
        humidity.f64()?,
        rainfall.f64()?,
    );

    let mut seen = HashSet::with_capacity(df.height());
    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        // Row numbers in messages are 1-based and exclude the header.
        let line = row + 1;
        let raw_date = dates.get(row).ok_or_else(|| {
            WeatherError::MalformedInput(format!("row {} has no date", line))
        })?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT).map_err(|_| {
            WeatherError::MalformedInput(format!(
                "row {} has unparseable date '{}'",
                line, raw_date
            ))
        })?;
        if !seen.insert(date) {
            return Err(WeatherError::MalformedInput(format!(
                "row {} repeats date {}",
                line, date
            )));
        }

        let value = |column: &Float64Chunked, name: &str| {
            column.get(row).ok_or_else(|| {
                WeatherError::MalformedInput(format!(
                    "row {} ({}) has a missing or non-numeric {}",
                    line, date, name
                ))
            })
        };
        let record = DailyRecord {
            date,
            temperature: value(temperature, "temperature")?,
            humidity: value(humidity, "humidity")?,
            rainfall: value(rainfall, "rainfall")?,
        };
        if let Some(message) = record.invalid_value() {
            return Err(WeatherError::MalformedInput(format!("row {}: {}", line, message)));
        }
        records.push(record);
    }

    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(contents: &str) -> Result<(tempfile::TempDir, std::path::PathBuf), std::io::Error> {
        let dir = tempdir()?;
        let path = dir.path().join("weather.csv");
        fs::write(&path, contents)?;
        Ok((dir, path))
    }

    #[test]
    fn test_load_valid_file() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, path) = write_csv(
            "date,temperature,humidity,rainfall,station\n\
             2023-01-02,4.5,80,1.2,a\n\
             2023-01-01,3,75.5,0,a\n",
        )?;
        let records = load_csv(&path)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(records[0].humidity, 80.0);
        assert_eq!(records[1].temperature, 3.0);
        Ok(())
    }

    #[test]
    fn test_rejects_duplicate_dates() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, path) = write_csv(
            "date,temperature,humidity,rainfall\n\
             2023-01-01,3,75,0\n\
             2023-01-01,4,70,0\n",
        )?;
        match load_csv(&path) {
            Err(WeatherError::MalformedInput(message)) => assert!(message.contains("2023-01-01")),
            other => panic!("expected a duplicate-date error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_rejects_unparseable_date() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, path) = write_csv(
            "date,temperature,humidity,rainfall\n\
             2023-01-01,3,75,0\n\
             01/02/2023,4,70,0\n",
        )?;
        match load_csv(&path) {
            Err(WeatherError::MalformedInput(message)) => assert!(message.contains("row 2")),
            other => panic!("expected a date error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_rejects_missing_column_and_bad_values() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, path) = write_csv("date,temperature,humidity\n2023-01-01,3,75\n")?;
        assert!(matches!(load_csv(&path), Err(WeatherError::MalformedInput(_))));

        let (_dir, path) = write_csv("date,temperature,humidity,rainfall\n2023-01-01,3,175,0\n")?;
        assert!(matches!(load_csv(&path), Err(WeatherError::MalformedInput(_))));

        let (_dir, path) = write_csv("date,temperature,humidity,rainfall\n2023-01-01,,75,0\n")?;
        assert!(matches!(load_csv(&path), Err(WeatherError::MalformedInput(_))));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_a_dataset_error() {
        let result = load_csv("/definitely/not/here/weather.csv");
        assert!(matches!(
            result,
            Err(WeatherError::Dataset(DatasetError::CsvRead(..)))
        ));
    }
}
