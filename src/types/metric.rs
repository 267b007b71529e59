//! Defines the `Metric` enum naming the numeric columns views and statistics operate on.

use crate::error::WeatherError;
use crate::types::record::DerivedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric column of the derived table.
///
/// Parsing accepts the column names used in exported CSV files
/// (`temperature`, `humidity`, `rainfall`, `comfort_index`), ignoring case.
/// Any other name is rejected with [`WeatherError::InvalidParameter`].
///
/// ```rust
/// use weather_dashboard::{Metric, WeatherError};
///
/// assert_eq!("Temperature".parse::<Metric>().unwrap(), Metric::Temperature);
/// assert!(matches!("wind".parse::<Metric>(), Err(WeatherError::InvalidParameter(_))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Daily temperature in degrees Celsius.
    Temperature,
    /// Relative humidity in percent.
    Humidity,
    /// Daily rainfall in millimetres.
    Rainfall,
    /// Derived comfort score, lower is more comfortable.
    ComfortIndex,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Rainfall,
        Metric::ComfortIndex,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Rainfall => "rainfall",
            Metric::ComfortIndex => "comfort_index",
        }
    }

    /// Display unit, empty for the unitless comfort index.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Rainfall => "mm",
            Metric::ComfortIndex => "",
        }
    }

    /// Reads this metric's value from a record.
    pub fn value_of(self, record: &DerivedRecord) -> f64 {
        match self {
            Metric::Temperature => record.temperature(),
            Metric::Humidity => record.humidity(),
            Metric::Rainfall => record.rainfall(),
            Metric::ComfortIndex => record.comfort_index,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            "rainfall" => Ok(Metric::Rainfall),
            "comfort_index" | "comfort" => Ok(Metric::ComfortIndex),
            _ => Err(WeatherError::InvalidParameter(format!(
                "unrecognized metric '{}'",
                s
            ))),
        }
    }
}
