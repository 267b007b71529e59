pub mod aggregate;
pub mod comfort;
pub mod derive;
pub mod extremes;
pub mod filter;
pub mod statistics;
pub mod table;
