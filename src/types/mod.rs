pub mod calendar;
pub mod metric;
pub mod record;
pub mod season;
pub mod traits;
pub mod weather_frame;
