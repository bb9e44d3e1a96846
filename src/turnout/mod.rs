//! Turnout computation.
//!
//! Responsibilities:
//!
//! - group a county's voters by age
//! - compute normalized per-age turnout with a minimum sample size
//! - average county curves into the reference key

pub mod aggregate;
pub mod compute;
pub mod key;

pub use aggregate::*;
pub use compute::*;
pub use key::*;
