use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::constants::{
    COL_CITY, COL_COUNTRY, COL_NAME, COL_POSTAL_CODE, COL_STATE, COL_STREET, COL_WEBSITE,
};
use crate::error::{ConverterError, Result};
use crate::types::InputRecord;

/// Header row plus data rows, cells already reduced to optional text
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// Positions of the required columns within a header row
#[derive(Debug, PartialEq)]
struct ColumnIndex {
    name: usize,
    street: usize,
    city: usize,
    state: usize,
    country: usize,
    postal_code: usize,
    website: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| ConverterError::MissingColumn(column.to_string()))
        };
        Ok(Self {
            name: find(COL_NAME)?,
            street: find(COL_STREET)?,
            city: find(COL_CITY)?,
            state: find(COL_STATE)?,
            country: find(COL_COUNTRY)?,
            postal_code: find(COL_POSTAL_CODE)?,
            website: find(COL_WEBSITE)?,
        })
    }

    fn record(&self, row: &[Option<String>]) -> InputRecord {
        let cell = |idx: usize| row.get(idx).cloned().flatten();
        InputRecord {
            name: cell(self.name).unwrap_or_default(),
            street: cell(self.street),
            city: cell(self.city),
            state: cell(self.state),
            postal_code: cell(self.postal_code),
            country: cell(self.country),
            website: cell(self.website),
        }
    }
}

/// Reads every row of the adviser export, in file order.
///
/// Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read from their
/// first worksheet; `.csv` files are read directly. A missing required column
/// fails the whole load.
#[instrument]
pub fn load_records(path: &Path) -> Result<Vec<InputRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        _ => return Err(ConverterError::UnsupportedInput(path.display().to_string())),
    };
    debug!("Header row has {} columns", table.headers.len());

    let columns = ColumnIndex::resolve(&table.headers)?;
    let records: Vec<InputRecord> = table.rows.iter().map(|row| columns.record(row)).collect();

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConverterError::EmptyWorkbook(path.display().to_string()))??;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell_text(cell).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.byte_headers()?.iter().map(decode_field).collect();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(record.iter().map(|field| non_blank(&decode_field(field))).collect());
    }

    Ok(RawTable { headers, rows })
}

/// UTF-8 when valid, otherwise Latin-1, which older exports are saved in.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Textual value of a spreadsheet cell; empty and error cells are absent.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => non_blank(s),
        Data::Int(i) => Some(i.to_string()),
        // Zip codes stored as numbers must not pick up a ".0"
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            Some(format!("{}", *f as i64))
        }
        other => non_blank(&other.to_string()),
    }
}

fn non_blank(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
