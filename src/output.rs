use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::constants::{GEOCODED_FILE, GEOCODED_HEADER, NO_ADDRESS_FILE, NO_ADDRESS_HEADER};
use crate::error::Result;
use crate::types::ResultTables;

/// Writes both result tables as CSV files inside one directory.
///
/// Every write replaces the previous file contents, so a checkpoint and the
/// final write are the same operation.
#[derive(Debug, Clone)]
pub struct CsvOutput {
    geocoded_path: PathBuf,
    no_address_path: PathBuf,
}

impl CsvOutput {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            geocoded_path: output_dir.join(GEOCODED_FILE),
            no_address_path: output_dir.join(NO_ADDRESS_FILE),
        }
    }

    pub fn geocoded_path(&self) -> &Path {
        &self.geocoded_path
    }

    pub fn no_address_path(&self) -> &Path {
        &self.no_address_path
    }

    /// Drops website-less no-address rows, then overwrites both files.
    /// Returns the number of rows dropped.
    #[instrument(skip_all)]
    pub fn write(&self, tables: &mut ResultTables) -> Result<usize> {
        let dropped = tables.drop_rows_without_website();

        if let Some(dir) = self.geocoded_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        write_table(&self.geocoded_path, &GEOCODED_HEADER, &tables.geocoded)?;
        write_table(&self.no_address_path, &NO_ADDRESS_HEADER, &tables.no_address)?;

        debug!(
            geocoded = tables.geocoded.len(),
            no_address = tables.no_address.len(),
            dropped,
            "Wrote result tables"
        );
        Ok(dropped)
    }
}

// The header goes out even for an empty table
fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
