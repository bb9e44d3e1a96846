//! `turnout-curves` library crate.
//!
//! The binary (`turnout`) is a thin wrapper around this library so that:
//!
//! - the turnout pipeline is testable without spawning processes
//! - ingest, computation and rendering stay separately reusable

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod turnout;
