//! Command-line parsing for the turnout tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! turnout code. Defaults mirror the constants in `domain`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    DEFAULT_DATA_FILE, DEFAULT_KEY_FILE, DEFAULT_REGION, MINIMUM_REGISTERED_VOTERS,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "turnout", version, about = "Voter turnout by age, normalized per county")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute per-county turnout curves, plot them, and write the reference key.
    Run(RunArgs),
    /// Plot a previously written reference key.
    Plot(PlotArgs),
}

/// Options for a full run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Tab-separated voter registration/history extract.
    #[arg(long, env = "TURNOUT_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Where to write the reference key JSON (overwritten).
    #[arg(long, env = "TURNOUT_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    pub key: PathBuf,

    /// Presidential election year (2000, 2004, 2008, 2012, 2016, 2020).
    #[arg(short = 'y', long, default_value_t = 2020)]
    pub year: i32,

    /// Region name used in the chart title.
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Hide ages with fewer registered voters than this.
    #[arg(long, default_value_t = MINIMUM_REGISTERED_VOTERS)]
    pub min_voters: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also write the chart as an SVG file.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// SVG width (pixels).
    #[arg(long, default_value_t = 1200)]
    pub svg_width: u32,

    /// SVG height (pixels).
    #[arg(long, default_value_t = 800)]
    pub svg_height: u32,
}

/// Options for plotting a saved key.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Key JSON file produced by `turnout run`.
    #[arg(long, value_name = "JSON", default_value = DEFAULT_KEY_FILE)]
    pub key: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
