use tracing::{debug, info, instrument, warn};

use crate::address::format_address;
use crate::config::Config;
use crate::constants::{CHECKPOINT_EVERY, PROGRESS_EVERY};
use crate::error::Result;
use crate::geocode::{Geocoder, GoogleGeocoder};
use crate::input::load_records;
use crate::output::CsvOutput;
use crate::types::{Coordinates, GeocodedResult, InputRecord, NoAddressResult, ResultTables};

/// What happened to a single input row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Address resolved to coordinates
    Geocoded,
    /// Service answered without a match; coordinates left empty
    NotFound,
    /// Lookup failed; sentinel coordinates written
    Failed,
    /// No usable street address; routed to the no-address table
    NoAddress,
}

/// Result of a complete run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total_rows: usize,
    pub geocoded: usize,
    pub not_found: usize,
    pub failed: usize,
    pub no_address_kept: usize,
    pub no_address_dropped: usize,
    pub checkpoints: usize,
    pub geocoded_file: String,
    pub no_address_file: String,
}

impl RunSummary {
    fn record(&mut self, outcome: RowOutcome) {
        self.total_rows += 1;
        match outcome {
            RowOutcome::Geocoded => self.geocoded += 1,
            RowOutcome::NotFound => self.not_found += 1,
            RowOutcome::Failed => self.failed += 1,
            RowOutcome::NoAddress => {}
        }
    }
}

/// Row-by-row conversion of the adviser export into the two result tables
pub struct Pipeline<'a> {
    geocoder: &'a dyn Geocoder,
    output: CsvOutput,
    progress_every: usize,
    checkpoint_every: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(geocoder: &'a dyn Geocoder, output: CsvOutput) -> Self {
        Self {
            geocoder,
            output,
            progress_every: PROGRESS_EVERY,
            checkpoint_every: CHECKPOINT_EVERY,
        }
    }

    /// Intervals below 1 are raised to 1.
    pub fn with_intervals(mut self, progress_every: usize, checkpoint_every: usize) -> Self {
        self.progress_every = progress_every.max(1);
        self.checkpoint_every = checkpoint_every.max(1);
        self
    }

    /// Processes every record in order, checkpointing both tables every
    /// `checkpoint_every` rows (starting at row 0) and once more at the end.
    #[instrument(skip_all, fields(rows = records.len()))]
    pub fn run(&self, records: &[InputRecord]) -> Result<RunSummary> {
        let total = records.len();
        let mut tables = ResultTables::new();
        let mut summary = RunSummary {
            geocoded_file: self.output.geocoded_path().display().to_string(),
            no_address_file: self.output.no_address_path().display().to_string(),
            ..RunSummary::default()
        };

        info!("🚀 Geocoding {} records", total);
        for (idx, record) in records.iter().enumerate() {
            if idx % self.progress_every == 0 {
                debug!(row = idx, total, "Progress");
                println!("   Row {idx}/{total}");
            }
            if idx % self.checkpoint_every == 0 {
                summary.no_address_dropped += self.output.write(&mut tables)?;
                summary.checkpoints += 1;
                debug!(row = idx, "Checkpoint written");
            }

            let outcome = self.process_record(idx, record, &mut tables);
            summary.record(outcome);
        }

        summary.no_address_dropped += self.output.write(&mut tables)?;
        summary.no_address_kept = tables.no_address.len();

        info!(
            geocoded = summary.geocoded,
            not_found = summary.not_found,
            failed = summary.failed,
            no_address_kept = summary.no_address_kept,
            no_address_dropped = summary.no_address_dropped,
            "✅ Processed {} records",
            summary.total_rows
        );
        if summary.failed > 0 {
            warn!(
                "{} rows carry sentinel coordinates (0, 0) in {}; check them before use",
                summary.failed, summary.geocoded_file
            );
        }
        Ok(summary)
    }

    /// Appends one record to the matching table. Never fails: a lookup error
    /// becomes the sentinel coordinate.
    fn process_record(
        &self,
        idx: usize,
        record: &InputRecord,
        tables: &mut ResultTables,
    ) -> RowOutcome {
        let Some(address) = format_address(record) else {
            tables.no_address.push(NoAddressResult {
                name: record.name.clone(),
                website: record.website.clone(),
            });
            return RowOutcome::NoAddress;
        };

        let (coordinates, outcome) = match self.geocoder.geocode(&address) {
            Ok(Some(coordinates)) => (Some(coordinates), RowOutcome::Geocoded),
            Ok(None) => (None, RowOutcome::NotFound),
            Err(e) => {
                warn!(row = idx, kind = e.kind(), "Geocoding '{}' failed: {}", address, e);
                (Some(Coordinates::SENTINEL), RowOutcome::Failed)
            }
        };

        tables.geocoded.push(GeocodedResult::new(
            record.name.clone(),
            address,
            coordinates,
            record.website.clone(),
        ));
        outcome
    }
}

/// Runs the whole conversion described by `config` against the given geocoder.
pub fn run_with_geocoder(config: &Config, geocoder: &dyn Geocoder) -> Result<RunSummary> {
    config.validate()?;

    let mut records = load_records(&config.input_path)?;
    if let Some(limit) = config.limit {
        if limit < records.len() {
            info!("Limiting run to the first {} of {} records", limit, records.len());
            records.truncate(limit);
        }
    }

    Pipeline::new(geocoder, CsvOutput::new(&config.output_dir))
        .with_intervals(config.progress_every, config.checkpoint_every)
        .run(&records)
}

/// Runs the conversion against the Google geocoding service.
pub fn run(config: &Config) -> Result<RunSummary> {
    let geocoder = GoogleGeocoder::new(&config.endpoint, &config.api_key, config.timeout())?;
    run_with_geocoder(config, &geocoder)
}
