use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported input file '{0}': expected .xlsx, .xlsm, .xls, .ods or .csv")]
    UnsupportedInput(String),

    #[error("Input file '{0}' contains no worksheet")]
    EmptyWorkbook(String),
}

pub type Result<T> = std::result::Result<T, ConverterError>;
