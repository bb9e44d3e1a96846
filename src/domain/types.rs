//! Shared domain types.
//!
//! This module defines:
//!
//! - run configuration (`ElectionYear`, `TurnoutConfig`)
//! - ingested voter facts and their groupings (`VoterFact`, `CountyBuckets`, `AgeBuckets`)
//! - turnout outputs (`TurnoutCurve`, `ReferenceKey`)

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Ages with fewer registered voters than this are hidden from curves.
pub const MINIMUM_REGISTERED_VOTERS: usize = 50;
/// Youngest eligible voting age.
pub const MIN_VOTING_AGE: u32 = 18;
/// Oldest age accepted before a row is treated as bad data.
pub const MAX_PLAUSIBLE_AGE: u32 = 110;

pub const DEFAULT_DATA_FILE: &str = "./data/voters.txt";
pub const DEFAULT_KEY_FILE: &str = "./key.json";
pub const DEFAULT_REGION: &str = "Missouri";

/// Presidential general elections with a known date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElectionYear {
    Y2000,
    Y2004,
    Y2008,
    Y2012,
    Y2016,
    Y2020,
}

impl ElectionYear {
    pub const ALL: [ElectionYear; 6] = [
        ElectionYear::Y2000,
        ElectionYear::Y2004,
        ElectionYear::Y2008,
        ElectionYear::Y2012,
        ElectionYear::Y2016,
        ElectionYear::Y2020,
    ];

    pub fn year(self) -> i32 {
        match self {
            ElectionYear::Y2000 => 2000,
            ElectionYear::Y2004 => 2004,
            ElectionYear::Y2008 => 2008,
            ElectionYear::Y2012 => 2012,
            ElectionYear::Y2016 => 2016,
            ElectionYear::Y2020 => 2020,
        }
    }

    /// Day of November on which the general election was held.
    pub fn november_day(self) -> u32 {
        match self {
            ElectionYear::Y2000 => 7,
            ElectionYear::Y2004 => 2,
            ElectionYear::Y2008 => 4,
            ElectionYear::Y2012 => 6,
            ElectionYear::Y2016 => 8,
            ElectionYear::Y2020 => 3,
        }
    }

    pub fn election_date(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year(), 11, self.november_day())
            .unwrap_or(NaiveDate::MIN)
    }

    /// Election date as `MM/DD/YYYY`.
    pub fn date_string(self) -> String {
        self.election_date().format("%m/%d/%Y").to_string()
    }

    /// Column name (and history value) marking participation, e.g. `11/03/2020 General`.
    pub fn tag(self) -> String {
        format!("{} General", self.date_string())
    }
}

impl TryFrom<i32> for ElectionYear {
    type Error = AppError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        ElectionYear::ALL
            .into_iter()
            .find(|e| e.year() == year)
            .ok_or_else(|| {
                let known: Vec<String> = ElectionYear::ALL.iter().map(|e| e.year().to_string()).collect();
                AppError::config(format!(
                    "Unsupported election year {year}. Choose one of: {}.",
                    known.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for ElectionYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.year())
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Built once from CLI flags (plus defaults) and passed by reference.
#[derive(Debug, Clone)]
pub struct TurnoutConfig {
    pub data_file: PathBuf,
    pub key_file: PathBuf,
    pub election: ElectionYear,
    /// Label used in the chart title.
    pub region: String,

    pub minimum_registered_voters: usize,
    pub min_age: u32,
    pub max_age: u32,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub chart_svg: Option<PathBuf>,
    /// SVG size in pixels.
    pub chart_svg_size: (u32, u32),
}

impl Default for TurnoutConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            election: ElectionYear::Y2020,
            region: DEFAULT_REGION.to_string(),
            minimum_registered_voters: MINIMUM_REGISTERED_VOTERS,
            min_age: MIN_VOTING_AGE,
            max_age: MAX_PLAUSIBLE_AGE,
            plot: true,
            plot_width: 100,
            plot_height: 25,
            chart_svg: None,
            chart_svg_size: (1200, 800),
        }
    }
}

/// One accepted voter row: age on election day and whether they voted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoterFact {
    pub age: u32,
    pub voted: bool,
}

/// County name -> voter facts in file order.
pub type CountyBuckets = BTreeMap<String, Vec<VoterFact>>;

/// Age -> voter facts of that exact age, for a single county.
pub type AgeBuckets = BTreeMap<u32, Vec<VoterFact>>;

/// Turnout at one qualifying age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgePoint {
    pub samples: usize,
    pub votes: usize,
    /// `votes / samples` divided by the county's overall turnout.
    pub normalized: f64,
}

/// Normalized turnout by age for one county.
///
/// Only ages meeting the minimum sample size appear.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnoutCurve {
    pub points: BTreeMap<u32, AgePoint>,
    /// Voters across qualifying ages.
    pub total_samples: usize,
    /// Votes across qualifying ages.
    pub total_votes: usize,
    /// `total_votes / total_samples`.
    pub overall_turnout: f64,
}

impl TurnoutCurve {
    /// `(age, normalized)` pairs, ascending by age.
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|(&age, p)| (age as f64, p.normalized))
            .collect()
    }
}

/// A county with a computed curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyCurve {
    pub county: String,
    pub curve: TurnoutCurve,
}

/// Cross-county mean of normalized turnout per age.
///
/// Serializes as a JSON object keyed by age.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceKey(pub BTreeMap<u32, f64>);

impl ReferenceKey {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, age: u32) -> Option<f64> {
        self.0.get(&age).copied()
    }

    /// `(age, value)` pairs, ascending by age.
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.0.iter().map(|(&age, &v)| (age as f64, v)).collect()
    }
}
