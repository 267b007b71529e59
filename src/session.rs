//! Provides `WeatherSession`, which owns a generator and memoizes the derived
//! table for the most recent generation parameters or input file.

use crate::dataset::loader::load_csv;
use crate::error::WeatherError;
use crate::generator::config::GeneratorConfig;
use crate::generator::weather_generator::{random_seed, WeatherGenerator};
use crate::processor::derive::derive_from;
use crate::processor::table::{DerivedTable, TableSource};
use bon::bon;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Parameters that fully determine a generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationParams {
    pub year: i32,
    pub seed: u64,
}

/// What the cached table was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Generated(GenerationParams),
    /// A CSV file and its modification time when it was read, so a rewritten
    /// file misses the cache.
    File {
        path: PathBuf,
        modified: Option<SystemTime>,
    },
}

/// Holds at most one derived table, keyed by what produced it.
///
/// Asking for the same parameters again returns the same [`Arc`] without
/// recomputing; asking for different ones replaces the cached table.
///
/// ```rust
/// use weather_dashboard::{GeneratorConfig, WeatherSession};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), weather_dashboard::WeatherError> {
/// let mut session = WeatherSession::with_config(GeneratorConfig::default(), Some(7))?;
/// let first = session.table().year(2023).call()?;
/// let again = session.table().year(2023).seed(7).call()?;
/// assert!(Arc::ptr_eq(&first, &again));
/// assert_eq!(first.len(), 365);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WeatherSession {
    generator: WeatherGenerator,
    default_seed: u64,
    cached: Option<(CacheKey, Arc<DerivedTable>)>,
}

#[bon]
impl WeatherSession {
    /// A session using the user-level generator config (or the defaults) and a random default seed.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_config(GeneratorConfig::load_default()?, None)
    }

    /// A session with an explicit config. `default_seed` is used whenever a
    /// table is requested without a seed; `None` draws one now.
    pub fn with_config(
        config: GeneratorConfig,
        default_seed: Option<u64>,
    ) -> Result<Self, WeatherError> {
        Ok(Self {
            generator: WeatherGenerator::new(config)?,
            default_seed: default_seed.unwrap_or_else(random_seed),
            cached: None,
        })
    }

    pub fn default_seed(&self) -> u64 {
        self.default_seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.generator.config()
    }

    /// The cache key and table currently held, if any.
    pub fn current(&self) -> Option<(&CacheKey, &Arc<DerivedTable>)> {
        self.cached.as_ref().map(|(key, table)| (key, table))
    }

    /// Returns the derived table for `year`, generating it on a cache miss.
    ///
    /// Without `seed` the session's default seed is used, so repeated calls
    /// see the same data.
    #[builder]
    pub fn table(&mut self, year: i32, seed: Option<u64>) -> Result<Arc<DerivedTable>, WeatherError> {
        let params = GenerationParams {
            year,
            seed: seed.unwrap_or(self.default_seed),
        };
        let key = CacheKey::Generated(params);
        if let Some(table) = self.lookup(&key) {
            return Ok(table);
        }

        let records = self.generator.generate(params.year, Some(params.seed))?;
        let table = derive_from(
            records,
            TableSource::Generated {
                year: params.year,
                seed: params.seed,
            },
        )?;
        Ok(self.store(key, table))
    }

    /// Loads and derives a CSV file.
    ///
    /// The cached table is reused while the path and the file's modification
    /// time are unchanged. A file whose modification time cannot be read is
    /// only reused if it was unreadable the previous time as well.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<DerivedTable>, WeatherError> {
        let path = path.as_ref().to_path_buf();
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        let key = CacheKey::File {
            path: path.clone(),
            modified,
        };
        if let Some(table) = self.lookup(&key) {
            return Ok(table);
        }

        let records = load_csv(&path)?;
        let table = derive_from(records, TableSource::File(path))?;
        Ok(self.store(key, table))
    }

    /// Drops the cached table; the next request recomputes it.
    pub fn invalidate(&mut self) {
        if let Some((key, _)) = self.cached.take() {
            info!("Invalidated cached table for {:?}", key);
        }
    }

    /// Replaces the generator config and drops the cached table.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InvalidParameter`] if `config` does not validate; the
    /// session is left unchanged in that case.
    pub fn set_config(&mut self, config: GeneratorConfig) -> Result<(), WeatherError> {
        self.generator = WeatherGenerator::new(config)?;
        self.invalidate();
        Ok(())
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<DerivedTable>> {
        match &self.cached {
            Some((cached_key, table)) if cached_key == key => {
                debug!("Cache hit for {:?}", key);
                Some(Arc::clone(table))
            }
            Some((cached_key, _)) => {
                warn!("Cache key changed from {:?} to {:?}, rebuilding table", cached_key, key);
                None
            }
            None => {
                info!("Cache miss for {:?}", key);
                None
            }
        }
    }

    fn store(&mut self, key: CacheKey, table: DerivedTable) -> Arc<DerivedTable> {
        let table = Arc::new(table);
        self.cached = Some((key, Arc::clone(&table)));
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::exporter::export_csv;
    use crate::{derive, generate};
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn session() -> Result<WeatherSession, WeatherError> {
        WeatherSession::with_config(GeneratorConfig::default(), Some(99))
    }

    #[test]
    fn test_repeated_parameters_hit_the_cache() -> Result<(), WeatherError> {
        let mut session = session()?;
        let first = session.table().year(2023).call()?;
        let second = session.table().year(2023).call()?;
        let explicit = session.table().year(2023).seed(99).call()?;
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &explicit));
        assert_eq!(
            first.source(),
            &TableSource::Generated {
                year: 2023,
                seed: 99
            }
        );
        Ok(())
    }

    #[test]
    fn test_changed_parameters_rebuild() -> Result<(), WeatherError> {
        let mut session = session()?;
        let first = session.table().year(2023).call()?;
        let other_seed = session.table().year(2023).seed(100).call()?;
        assert!(!Arc::ptr_eq(&first, &other_seed));
        assert_ne!(first.records(), other_seed.records());

        let leap = session.table().year(2024).call()?;
        assert_eq!(leap.len(), 366);

        // Same parameters as the first call: equal content, new allocation.
        let back = session.table().year(2023).call()?;
        assert!(!Arc::ptr_eq(&first, &back));
        assert_eq!(*first, *back);
        Ok(())
    }

    #[test]
    fn test_invalidate_and_set_config() -> Result<(), WeatherError> {
        let mut session = session()?;
        let first = session.table().year(2023).call()?;
        session.invalidate();
        assert!(session.current().is_none());
        let rebuilt = session.table().year(2023).call()?;
        assert!(!Arc::ptr_eq(&first, &rebuilt));

        let warmer = GeneratorConfig {
            mean_temperature: 25.0,
            ..GeneratorConfig::default()
        };
        session.set_config(warmer)?;
        assert!(session.current().is_none());
        let warm = session.table().year(2023).call()?;
        let mean = |t: &DerivedTable| t.key_metrics().mean_temperature.unwrap_or_default();
        assert!(mean(&warm) > mean(&rebuilt));

        let broken = GeneratorConfig {
            humidity_noise_sd: -1.0,
            ..GeneratorConfig::default()
        };
        assert!(session.set_config(broken).is_err());
        assert_eq!(session.config().mean_temperature, 25.0);
        Ok(())
    }

    #[test]
    fn test_invalid_year_leaves_cache_alone() -> Result<(), WeatherError> {
        let mut session = session()?;
        let first = session.table().year(2023).call()?;
        assert!(session.table().year(0).call().is_err());
        let (key, table) = session.current().expect("2023 stays cached");
        assert!(Arc::ptr_eq(&first, table));
        assert_eq!(
            key,
            &CacheKey::Generated(GenerationParams {
                year: 2023,
                seed: 99
            })
        );
        Ok(())
    }

    #[test]
    fn test_load_file_is_cached_by_path() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = session()?;
        let generated = session.table().year(2023).call()?;
        let dir = tempdir()?;
        let path = dir.path().join("year.csv");
        export_csv(&generated, &path)?;

        let loaded = session.load_file(&path)?;
        assert_eq!(loaded.daily_records().len(), 365);
        assert_eq!(loaded.source(), &TableSource::File(path.clone()));
        let again = session.load_file(&path)?;
        assert!(Arc::ptr_eq(&loaded, &again));
        Ok(())
    }

    #[test]
    fn test_rewritten_file_is_reloaded() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = session()?;
        let dir = tempdir()?;
        let path = dir.path().join("year.csv");
        export_csv(&derive(generate(2023, Some(4))?)?, &path)?;
        let loaded = session.load_file(&path)?;
        assert!(Arc::ptr_eq(&loaded, &session.load_file(&path)?));

        let second = derive(generate(2023, Some(5))?)?;
        export_csv(&second, &path)?;
        // coarse filesystem clocks could otherwise leave the time unchanged
        File::options()
            .write(true)
            .open(&path)?
            .set_modified(SystemTime::now() + Duration::from_secs(60))?;

        let reloaded = session.load_file(&path)?;
        assert!(!Arc::ptr_eq(&loaded, &reloaded));
        assert_eq!(reloaded.daily_records(), second.daily_records());
        assert!(matches!(
            session.current(),
            Some((CacheKey::File { path: cached, modified: Some(_) }, _)) if cached == &path
        ));
        Ok(())
    }
}
