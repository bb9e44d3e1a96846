//! TSV ingest of the voter registration/history extract.
//!
//! This module turns raw voter rows into `VoterFact`s grouped by county.
//!
//! Design goals:
//! - **Strict schema** for the header (missing columns abort the run)
//! - **Row-level validation** (skip bad rows, count and log what happened)
//! - **Deterministic behavior** (counties are kept in an ordered map)
//! - **Separation of concerns**: no turnout math here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::domain::{CountyBuckets, TurnoutConfig, VoterFact};
use crate::error::AppError;
use crate::math::{AgeOutcome, age, meets_deadline};

pub const COUNTY_COLUMN: &str = "County";
pub const BIRTHDATE_COLUMN: &str = "Birthdate";
pub const REGISTRATION_COLUMN: &str = "Registration Date";

/// Why a data row was left out of the county buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingRegistration,
    /// Registered after election day.
    LateRegistration,
    MissingBirthdate,
    /// Younger than the minimum voting age (or born after election day).
    Underage,
    /// Older than the plausible maximum.
    ImplausibleAge,
    /// Unparseable dates or an undecodable record.
    Malformed,
}

/// Per-reason skip counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub missing_registration: usize,
    pub late_registration: usize,
    pub missing_birthdate: usize,
    pub underage: usize,
    pub implausible_age: usize,
    pub malformed: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingRegistration => self.missing_registration += 1,
            SkipReason::LateRegistration => self.late_registration += 1,
            SkipReason::MissingBirthdate => self.missing_birthdate += 1,
            SkipReason::Underage => self.underage += 1,
            SkipReason::ImplausibleAge => self.implausible_age += 1,
            SkipReason::Malformed => self.malformed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.missing_registration
            + self.late_registration
            + self.missing_birthdate
            + self.underage
            + self.implausible_age
            + self.malformed
    }
}

/// Counters describing one ingest pass.
///
/// `rows` counts every data row read, including rows skipped later.
/// `voters`, `votes` and `counties` only reflect recorded facts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows: usize,
    pub voters: usize,
    pub votes: usize,
    pub counties: usize,
    pub skipped: SkipCounts,
}

impl IngestSummary {
    /// `votes / voters`, or `None` when no voter was recorded.
    pub fn overall_turnout(&self) -> Option<f64> {
        if self.voters == 0 {
            return None;
        }
        Some(self.votes as f64 / self.voters as f64)
    }
}

/// Ingest output: facts per county plus summary counters.
#[derive(Debug, Clone)]
pub struct IngestedVoters {
    pub counties: CountyBuckets,
    pub summary: IngestSummary,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    county: usize,
    birthdate: usize,
    registration: usize,
    election: usize,
}

/// Per-run constants used while classifying rows.
struct RowContext<'a> {
    config: &'a TurnoutConfig,
    election_date: String,
    election_tag: String,
}

enum RowOutcome {
    Accepted { county: String, fact: VoterFact },
    Skipped(SkipReason),
}

/// Open the configured data file and ingest it.
pub fn load_voters(config: &TurnoutConfig) -> Result<IngestedVoters, AppError> {
    let file = File::open(&config.data_file).map_err(|e| {
        AppError::io(format!(
            "Failed to open voter file '{}': {e}",
            config.data_file.display()
        ))
    })?;
    info!(path = %config.data_file.display(), "Reading voter file");
    ingest_reader(file, config)
}

/// Ingest a tab-separated voter extract from any reader.
pub fn ingest_reader<R: Read>(input: R, config: &TurnoutConfig) -> Result<IngestedVoters, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read voter file header: {e}")))?
        .clone();

    let ctx = RowContext {
        config,
        election_date: config.election.date_string(),
        election_tag: config.election.tag(),
    };
    let columns = resolve_columns(&headers, &ctx.election_tag)?;

    let mut counties = CountyBuckets::new();
    let mut summary = IngestSummary::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = idx + 2;
        summary.rows += 1;

        let outcome = match result {
            Ok(record) => classify_row(&record, columns, &ctx, line),
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable row");
                RowOutcome::Skipped(SkipReason::Malformed)
            }
        };

        match outcome {
            RowOutcome::Accepted { county, fact } => {
                summary.voters += 1;
                if fact.voted {
                    summary.votes += 1;
                }
                counties.entry(county).or_default().push(fact);
            }
            RowOutcome::Skipped(reason) => summary.skipped.record(reason),
        }
    }

    summary.counties = counties.len();
    log_summary(&summary);

    Ok(IngestedVoters { counties, summary })
}

fn log_summary(summary: &IngestSummary) {
    info!(rows = summary.rows, "processed rows");
    info!(
        voters = summary.voters,
        counties = summary.counties,
        "processed voters"
    );
    match summary.overall_turnout() {
        Some(turnout) => info!(turnout, total_votes = summary.votes, "overall turnout"),
        None => warn!("no voters recorded; no turnout computable"),
    }
    debug!(skipped = ?summary.skipped, "skip counters");
}

fn resolve_columns(headers: &StringRecord, election_tag: &str) -> Result<Columns, AppError> {
    let header_map = build_header_map(headers);
    let find = |name: &str| {
        header_map
            .get(&normalize_header_name(name))
            .copied()
            .ok_or_else(|| AppError::missing_column(name))
    };

    Ok(Columns {
        county: find(COUNTY_COLUMN)?,
        birthdate: find(BIRTHDATE_COLUMN)?,
        registration: find(REGISTRATION_COLUMN)?,
        election: find(election_tag)?,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins on duplicate headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Exports from spreadsheet tools sometimes carry a BOM on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn classify_row(record: &StringRecord, columns: Columns, ctx: &RowContext<'_>, line: usize) -> RowOutcome {
    let county = get_field(record, columns.county).unwrap_or_default();

    let Some(registered) = get_field(record, columns.registration) else {
        warn!(line, county, "skipping row with no registration date");
        return RowOutcome::Skipped(SkipReason::MissingRegistration);
    };

    match meets_deadline(registered, &ctx.election_date) {
        Ok(true) => {}
        Ok(false) => return RowOutcome::Skipped(SkipReason::LateRegistration),
        Err(e) => {
            warn!(line, county, error = %e, "skipping row with malformed registration date");
            return RowOutcome::Skipped(SkipReason::Malformed);
        }
    }

    let Some(birth) = get_field(record, columns.birthdate) else {
        warn!(line, county, "skipping row with no birth date");
        return RowOutcome::Skipped(SkipReason::MissingBirthdate);
    };

    let outcome = match age(birth, &ctx.election_date) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(line, county, error = %e, "skipping row with malformed birth date");
            return RowOutcome::Skipped(SkipReason::Malformed);
        }
    };

    let years = match outcome {
        AgeOutcome::Years(y) if y < ctx.config.min_age => {
            return RowOutcome::Skipped(SkipReason::Underage);
        }
        AgeOutcome::Years(y) if y > ctx.config.max_age => {
            warn!(line, county, age = y, "skipping unreasonable age");
            return RowOutcome::Skipped(SkipReason::ImplausibleAge);
        }
        AgeOutcome::Years(y) => y,
        // Birth after election day: not a voter on that date.
        AgeOutcome::BornAfter { .. } => {
            debug!(line, county, age = outcome.as_fraction(), "birth date after election day");
            return RowOutcome::Skipped(SkipReason::Underage);
        }
    };

    let voted = get_field(record, columns.election).is_some()
        || record.iter().any(|cell| cell.trim() == ctx.election_tag);

    RowOutcome::Accepted {
        county: county.to_string(),
        fact: VoterFact { age: years, voted },
    }
}

fn get_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}
