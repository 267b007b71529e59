mod dashboard;
mod dataset;
mod error;
mod generator;
mod processor;
mod session;
mod types;

pub use error::WeatherError;
pub use dataset::error::DatasetError;

pub use generator::config::{GeneratorConfig, SeasonalValues};
pub use generator::weather_generator::{generate, random_seed, WeatherGenerator};

pub use processor::aggregate::{MonthlyAggregate, SeasonalAggregate};
pub use processor::comfort::{comfort_index, COMFORTABLE_HUMIDITY, HUMIDITY_PENALTY_SCALE, IDEAL_TEMPERATURE};
pub use processor::derive::{derive, derive_from, EXTREME_STD_DEVS};
pub use processor::extremes::Extremes;
pub use processor::filter::RecordFilter;
pub use processor::statistics::{CorrelationMatrix, MetricSummary, RAINY_DAY_THRESHOLD_MM};
pub use processor::table::{DerivedTable, TableSource};

pub use dashboard::{ComfortPoint, ComfortView, ExtremeDays, KeyMetrics, TimeSeriesPoint};
pub use dataset::exporter::export_csv;
pub use dataset::loader::load_csv;
pub use session::{CacheKey, GenerationParams, WeatherSession};

pub use types::calendar::{month_name, month_name_of, month_of, season_of, MONTH_NAMES};
pub use types::metric::Metric;
pub use types::record::{DailyRecord, DerivedRecord, ExtremeFlags};
pub use types::season::Season;
pub use types::weather_frame::WeatherLazyFrame;

pub use types::traits::any::any_date::AnyDate;
pub use types::traits::period::date_period::DatePeriod;
pub use types::traits::types::{Month, StartEndDate, Year};
