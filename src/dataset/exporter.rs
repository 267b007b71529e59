use crate::dataset::error::DatasetError;
use crate::error::WeatherError;
use crate::processor::table::DerivedTable;
use log::info;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Writes every column of [`DerivedTable::to_frame`] to a CSV file with a
/// header, creating missing parent directories.
pub fn export_csv(table: &DerivedTable, path: impl AsRef<Path>) -> Result<(), WeatherError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| DatasetError::DirCreation(parent.to_path_buf(), e))?;
    }

    let mut df = table.to_frame()?;
    let mut file =
        File::create(path).map_err(|e| DatasetError::FileCreate(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| DatasetError::CsvWrite(path.to_path_buf(), e))?;

    info!("Exported {} records to {:?}", df.height(), path);
    Ok(())
}
