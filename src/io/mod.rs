//! Input/output helpers.
//!
//! - TSV voter ingest + row validation (`ingest`)
//! - reference key JSON read/write (`key`)

pub mod ingest;
pub mod key;

pub use ingest::*;
pub use key::*;
