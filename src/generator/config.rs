//! Parameters of the synthetic weather generator, loadable from JSON.

use crate::error::WeatherError;
use crate::types::season::Season;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "weather_dashboard";
const CONFIG_FILE_NAME: &str = "generator.json";

/// One value per season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalValues<T> {
    pub winter: T,
    pub spring: T,
    pub summer: T,
    pub fall: T,
}

impl<T: Copy> SeasonalValues<T> {
    pub fn get(&self, season: Season) -> T {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }
}

/// Shape of the seasonal curves and the noise added on top of them.
///
/// Missing fields in a JSON file fall back to [`GeneratorConfig::default`].
///
/// ```rust
/// use weather_dashboard::GeneratorConfig;
///
/// let config: GeneratorConfig = serde_json::from_str(r#"{ "mean_temperature": 25.0 }"#).unwrap();
/// assert_eq!(config.mean_temperature, 25.0);
/// assert_eq!(config.temperature_amplitude, GeneratorConfig::default().temperature_amplitude);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Annual mean of the temperature curve, °C.
    pub mean_temperature: f64,
    /// Half the peak-to-trough swing of the temperature curve, °C.
    pub temperature_amplitude: f64,
    /// Zero-based day of year at which the temperature curve peaks.
    pub peak_day: u32,
    /// Standard deviation of the daily temperature noise.
    pub temperature_noise_sd: f64,
    /// Temperature noise is clamped to `±temperature_noise_bound`.
    pub temperature_noise_bound: f64,
    /// Humidity baseline per season, %.
    pub humidity_baseline: SeasonalValues<f64>,
    /// Percentage points of humidity removed per °C the temperature curve sits above its mean.
    pub humidity_temperature_coupling: f64,
    /// Standard deviation of the daily humidity noise.
    pub humidity_noise_sd: f64,
    /// Probability that a day in the season has rain.
    pub rain_probability: SeasonalValues<f64>,
    /// Mean rainfall of a rain day, mm. Amounts follow an exponential distribution.
    pub rain_mean_mm: SeasonalValues<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mean_temperature: 15.0,
            temperature_amplitude: 12.0,
            peak_day: 196,
            temperature_noise_sd: 3.0,
            temperature_noise_bound: 9.0,
            humidity_baseline: SeasonalValues {
                winter: 75.0,
                spring: 65.0,
                summer: 55.0,
                fall: 70.0,
            },
            humidity_temperature_coupling: 0.5,
            humidity_noise_sd: 10.0,
            rain_probability: SeasonalValues {
                winter: 0.2,
                spring: 0.4,
                summer: 0.2,
                fall: 0.4,
            },
            rain_mean_mm: SeasonalValues {
                winter: 2.0,
                spring: 5.0,
                summer: 2.0,
                fall: 5.0,
            },
        }
    }
}

impl GeneratorConfig {
    /// Reads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// [`WeatherError::ConfigRead`] if the file cannot be read and
    /// [`WeatherError::ConfigParse`] if it is not valid JSON for this struct.
    pub fn from_json_file(path: &Path) -> Result<Self, WeatherError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WeatherError::ConfigRead(path.to_path_buf(), e))?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| WeatherError::ConfigParse(path.to_path_buf(), e))?;
        info!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Location of the user-level config file, if a config directory exists on this platform.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the user-level config file when present, the built-in defaults otherwise.
    pub fn load_default() -> Result<Self, WeatherError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_json_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Checks that every parameter describes a usable distribution.
    pub fn validate(&self) -> Result<(), WeatherError> {
        fn invalid(message: String) -> Result<(), WeatherError> {
            Err(WeatherError::InvalidParameter(message))
        }

        if !self.mean_temperature.is_finite() {
            return invalid("mean_temperature must be finite".to_string());
        }
        if !(self.temperature_amplitude.is_finite() && self.temperature_amplitude >= 0.0) {
            return invalid(format!(
                "temperature_amplitude must be a non-negative number, got {}",
                self.temperature_amplitude
            ));
        }
        if self.peak_day >= 366 {
            return invalid(format!(
                "peak_day must be a zero-based day of year below 366, got {}",
                self.peak_day
            ));
        }
        let spreads = [
            ("temperature_noise_sd", self.temperature_noise_sd),
            ("temperature_noise_bound", self.temperature_noise_bound),
            ("humidity_noise_sd", self.humidity_noise_sd),
        ];
        for (name, value) in spreads {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        if !self.humidity_temperature_coupling.is_finite() {
            return invalid("humidity_temperature_coupling must be finite".to_string());
        }
        for season in Season::ALL {
            let baseline = self.humidity_baseline.get(season);
            if !(0.0..=100.0).contains(&baseline) {
                return invalid(format!(
                    "humidity baseline for {} must lie in [0, 100], got {}",
                    season, baseline
                ));
            }
            let probability = self.rain_probability.get(season);
            if !(0.0..=1.0).contains(&probability) {
                return invalid(format!(
                    "rain probability for {} must lie in [0, 1], got {}",
                    season, probability
                ));
            }
            let mean = self.rain_mean_mm.get(season);
            if !(mean.is_finite() && mean > 0.0) {
                return invalid(format!(
                    "rain mean for {} must be a positive number, got {}",
                    season, mean
                ));
            }
        }
        Ok(())
    }
}
