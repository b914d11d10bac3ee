use serde::Serialize;

/// One row of the adviser export. Absent cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Marker written for rows whose lookup failed
    pub const SENTINEL: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };
}

/// Row of `SEC_fa_data.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedResult {
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub website: Option<String>,
}

impl GeocodedResult {
    /// `None` coordinates leave both columns empty; the pair is never split.
    pub fn new(
        name: String,
        address: String,
        coordinates: Option<Coordinates>,
        website: Option<String>,
    ) -> Self {
        Self {
            name,
            address,
            lat: coordinates.map(|c| c.lat),
            long: coordinates.map(|c| c.lng),
            website,
        }
    }
}

/// Row of `SEC_fa_noaddy_data.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoAddressResult {
    pub name: String,
    pub website: Option<String>,
}

/// The two growing output tables of a run
#[derive(Debug, Default)]
pub struct ResultTables {
    pub geocoded: Vec<GeocodedResult>,
    pub no_address: Vec<NoAddressResult>,
}

impl ResultTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops no-address rows lacking a website and returns how many went.
    pub fn drop_rows_without_website(&mut self) -> usize {
        let before = self.no_address.len();
        self.no_address.retain(|row| row.website.is_some());
        before - self.no_address.len()
    }
}
