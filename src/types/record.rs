use crate::types::calendar::{month_name_of, month_of, season_of};
use crate::types::season::Season;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of weather observations.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temperature: f64, // °C
    pub humidity: f64,    // % relative, 0-100
    pub rainfall: f64,    // mm, >= 0
}

impl DailyRecord {
    /// Describes the first value violating the record invariants, if any.
    pub(crate) fn invalid_value(&self) -> Option<String> {
        let values = [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("rainfall", self.rainfall),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Some(format!("{} on {} is not a finite number ({})", name, self.date, value));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Some(format!(
                "humidity on {} must lie in [0, 100], got {}",
                self.date, self.humidity
            ));
        }
        if self.rainfall < 0.0 {
            return Some(format!(
                "rainfall on {} must not be negative, got {}",
                self.date, self.rainfall
            ));
        }
        None
    }
}

/// Marks values lying far from the table mean of their metric.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtremeFlags {
    pub temperature: bool,
    pub humidity: bool,
    pub rainfall: bool,
}

impl ExtremeFlags {
    pub fn any(&self) -> bool {
        self.temperature || self.humidity || self.rainfall
    }
}

/// A [`DailyRecord`] with the columns computed by [`crate::derive`].
///
/// Calendar fields are not stored; `month`, `month_name` and `season` are
/// recomputed from `date` on every call.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub record: DailyRecord,
    pub comfort_index: f64,
    pub extremes: ExtremeFlags,
}

impl DerivedRecord {
    pub fn date(&self) -> NaiveDate {
        self.record.date
    }
    pub fn temperature(&self) -> f64 {
        self.record.temperature
    }
    pub fn humidity(&self) -> f64 {
        self.record.humidity
    }
    pub fn rainfall(&self) -> f64 {
        self.record.rainfall
    }
    pub fn month(&self) -> u32 {
        month_of(self.record.date)
    }
    pub fn month_name(&self) -> &'static str {
        month_name_of(self.record.date)
    }
    pub fn season(&self) -> Season {
        season_of(self.record.date)
    }
}
