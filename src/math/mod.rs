//! Pure helpers with no I/O.
//!
//! - `dates`: `MM/DD/YYYY` comparison and whole-year ages

pub mod dates;

pub use dates::*;
