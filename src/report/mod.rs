//! Reporting: terminal summaries and chart labels.

pub mod format;

pub use format::*;
