pub mod error;
pub mod exporter;
pub mod loader;
