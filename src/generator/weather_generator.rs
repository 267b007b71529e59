use crate::error::WeatherError;
use crate::generator::config::{GeneratorConfig, SeasonalValues};
use crate::types::calendar::season_of;
use crate::types::record::DailyRecord;
use crate::types::traits::utils::days_in_year;
use chrono::{Datelike, NaiveDate};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Normal};
use std::f64::consts::TAU;

/// Draws a fresh seed from the thread-local RNG.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

/// Generates one [`DailyRecord`] per day of `year` with the default [`GeneratorConfig`].
///
/// Passing the same `seed` twice yields identical records. With `seed = None`
/// a random seed is drawn.
///
/// # Errors
///
/// Returns [`WeatherError::InvalidParameter`] if `year` is not positive or
/// lies outside the supported calendar range.
///
/// # Examples
///
/// ```rust
/// use weather_dashboard::generate;
///
/// # fn main() -> Result<(), weather_dashboard::WeatherError> {
/// let records = generate(2024, Some(42))?;
/// assert_eq!(records.len(), 366);
/// assert_eq!(records, generate(2024, Some(42))?);
/// # Ok(())
/// # }
/// ```
pub fn generate(year: i32, seed: Option<u64>) -> Result<Vec<DailyRecord>, WeatherError> {
    WeatherGenerator::new(GeneratorConfig::default())?.generate(year, seed)
}

/// Synthesizes a year of daily weather following seasonal curves plus noise.
///
/// For every day, in date order, the generator draws from the random source in
/// a fixed sequence: temperature noise, humidity noise, the rain decision and,
/// on rain days only, the rain amount. Output is therefore fully determined by
/// the config, the year and the random source.
#[derive(Debug, Clone)]
pub struct WeatherGenerator {
    config: GeneratorConfig,
    temperature_noise: Normal<f64>,
    humidity_noise: Normal<f64>,
    rain_amount: SeasonalValues<Exp<f64>>,
}

impl WeatherGenerator {
    /// Validates `config` and prepares the noise distributions.
    pub fn new(config: GeneratorConfig) -> Result<Self, WeatherError> {
        config.validate()?;

        let temperature_noise = normal(config.temperature_noise_sd)?;
        let humidity_noise = normal(config.humidity_noise_sd)?;
        let rain_amount = SeasonalValues {
            winter: exponential(config.rain_mean_mm.winter)?,
            spring: exponential(config.rain_mean_mm.spring)?,
            summer: exponential(config.rain_mean_mm.summer)?,
            fall: exponential(config.rain_mean_mm.fall)?,
        };

        Ok(Self {
            config,
            temperature_noise,
            humidity_noise,
            rain_amount,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates `year` from a `ChaCha8Rng` seeded with `seed`, or a random seed when `None`.
    pub fn generate(&self, year: i32, seed: Option<u64>) -> Result<Vec<DailyRecord>, WeatherError> {
        let seed = seed.unwrap_or_else(random_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let records = self.generate_with_rng(year, &mut rng)?;
        info!(
            "Generated {} daily records for {} with seed {}",
            records.len(),
            year,
            seed
        );
        Ok(records)
    }

    /// Generates `year` drawing all randomness from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        year: i32,
        rng: &mut R,
    ) -> Result<Vec<DailyRecord>, WeatherError> {
        if year <= 0 {
            return Err(WeatherError::InvalidParameter(format!(
                "year must be positive, got {}",
                year
            )));
        }
        let out_of_range =
            || WeatherError::InvalidParameter(format!("year {} is outside the calendar range", year));
        let first_day = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
        let day_count = days_in_year(year).ok_or_else(out_of_range)?;

        let mut records = Vec::with_capacity(day_count as usize);
        for date in first_day.iter_days().take(day_count as usize) {
            records.push(self.generate_day(date, day_count, rng));
        }
        Ok(records)
    }

    fn generate_day<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        day_count: u32,
        rng: &mut R,
    ) -> DailyRecord {
        let config = &self.config;
        let season = season_of(date);

        let baseline = self.baseline_temperature(date.ordinal0(), day_count);
        let bound = config.temperature_noise_bound;
        let temperature_noise = self.temperature_noise.sample(rng).clamp(-bound, bound);
        let temperature = baseline + temperature_noise;

        let anomaly = baseline - config.mean_temperature;
        let humidity = (config.humidity_baseline.get(season)
            - config.humidity_temperature_coupling * anomaly
            + self.humidity_noise.sample(rng))
        .clamp(0.0, 100.0);

        let rain_draw: f64 = rng.random();
        let rainfall = if rain_draw < config.rain_probability.get(season) {
            self.rain_amount.get(season).sample(rng).max(0.0)
        } else {
            0.0
        };

        DailyRecord {
            date,
            temperature,
            humidity,
            rainfall,
        }
    }

    /// Seasonal temperature curve, peaking on `peak_day`.
    fn baseline_temperature(&self, day_of_year: u32, day_count: u32) -> f64 {
        let phase = (day_of_year as f64 - self.config.peak_day as f64) / day_count as f64;
        self.config.mean_temperature + self.config.temperature_amplitude * (TAU * phase).cos()
    }
}

fn normal(std_dev: f64) -> Result<Normal<f64>, WeatherError> {
    Normal::new(0.0, std_dev).map_err(|e| {
        WeatherError::InvalidParameter(format!("invalid noise spread {}: {}", std_dev, e))
    })
}

fn exponential(mean: f64) -> Result<Exp<f64>, WeatherError> {
    Exp::new(1.0 / mean).map_err(|e| {
        WeatherError::InvalidParameter(format!("invalid rain mean {}: {}", mean, e))
    })
}
