/// Column names of the SEC "Registered Investment Advisers" export
pub const COL_NAME: &str = "Primary Business Name";
pub const COL_STREET: &str = "Main Office Street Address 1";
pub const COL_CITY: &str = "Main Office City";
pub const COL_STATE: &str = "Main Office State";
pub const COL_COUNTRY: &str = "Main Office Country";
pub const COL_POSTAL_CODE: &str = "Main Office Postal Code";
pub const COL_WEBSITE: &str = "Website Address";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_NAME,
    COL_STREET,
    COL_CITY,
    COL_STATE,
    COL_COUNTRY,
    COL_POSTAL_CODE,
    COL_WEBSITE,
];

// Output files, always overwritten
pub const GEOCODED_FILE: &str = "SEC_fa_data.csv";
pub const NO_ADDRESS_FILE: &str = "SEC_fa_noaddy_data.csv";

pub const GEOCODED_HEADER: [&str; 5] = ["name", "address", "lat", "long", "website"];
pub const NO_ADDRESS_HEADER: [&str; 2] = ["name", "website"];

pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Inline static credential; replace before a real run or set GOOGLE_MAPS_API_KEY
pub const DEFAULT_API_KEY: &str = "REPLACE_WITH_GOOGLE_MAPS_API_KEY";

/// Status the geocoding service reports on success
pub const STATUS_OK: &str = "OK";

/// Country (compared case-insensitively) that gets the US address layout
pub const US_COUNTRY: &str = "United States";

pub const DEFAULT_INPUT_PATH: &str = "SEC_fa_input.xlsx";
pub const DEFAULT_CONFIG_PATH: &str = "fa_geocoder.toml";
pub const PROGRESS_EVERY: usize = 100;
pub const CHECKPOINT_EVERY: usize = 1000;
