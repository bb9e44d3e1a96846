//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`ElectionYear`, `TurnoutConfig`)
//! - ingested voter facts (`VoterFact`) and their county/age groupings
//! - turnout outputs (`TurnoutCurve`, `ReferenceKey`)

pub mod types;

pub use types::*;
