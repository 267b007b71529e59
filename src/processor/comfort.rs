//! The comfort index: a single score summarizing how pleasant a day feels.

/// Temperature at which the temperature term of the index is zero, °C.
pub const IDEAL_TEMPERATURE: f64 = 23.0;
/// Humidity above which the humidity term starts adding discomfort, %.
pub const COMFORTABLE_HUMIDITY: f64 = 60.0;
/// Percentage points of excess humidity worth one index point.
pub const HUMIDITY_PENALTY_SCALE: f64 = 10.0;

/// Computes the comfort index of a day. Lower is more comfortable; zero is ideal.
///
/// `|temperature - 23| + max(0, humidity - 60) / 10`
///
/// Each degree away from 23 °C adds one point, and every 10 percentage points
/// of humidity above 60 % add another.
///
/// ```rust
/// use weather_dashboard::comfort_index;
///
/// assert_eq!(comfort_index(23.0, 50.0), 0.0);
/// assert_eq!(comfort_index(18.0, 60.0), 5.0);
/// assert_eq!(comfort_index(30.0, 90.0), 10.0);
/// ```
pub fn comfort_index(temperature: f64, humidity: f64) -> f64 {
    let temperature_discomfort = (temperature - IDEAL_TEMPERATURE).abs();
    let humidity_discomfort = (humidity - COMFORTABLE_HUMIDITY).max(0.0) / HUMIDITY_PENALTY_SCALE;
    temperature_discomfort + humidity_discomfort
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_day_scores_zero() {
        assert_eq!(comfort_index(IDEAL_TEMPERATURE, 0.0), 0.0);
        assert_eq!(comfort_index(IDEAL_TEMPERATURE, COMFORTABLE_HUMIDITY), 0.0);
    }

    #[test]
    fn test_temperature_penalty_is_symmetric() {
        assert_eq!(comfort_index(13.0, 40.0), comfort_index(33.0, 40.0));
    }

    #[test]
    fn test_humidity_penalty_only_above_threshold() {
        assert_eq!(comfort_index(23.0, 59.9), 0.0);
        assert!((comfort_index(23.0, 85.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_humid_heat_is_worse_than_dry_heat() {
        assert!(comfort_index(32.0, 95.0) > comfort_index(32.0, 30.0));
    }
}
