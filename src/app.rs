//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging and loads `.env`
//! - parses CLI arguments into a `TurnoutConfig`
//! - runs the turnout pipeline
//! - prints the summary and presents the charts

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, PlotArgs, RunArgs};
use crate::domain::{ElectionYear, TurnoutConfig};
use crate::error::AppError;
use crate::plot::{AsciiChart, ChartRenderer, ChartSet, LineStyle, SvgChart};

pub mod pipeline;

/// Entry point for the `turnout` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(&args),
        Command::Plot(args) => handle_plot(&args),
    }
}

/// Install the stderr log subscriber (`RUST_LOG`, default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(args: &RunArgs) -> Result<(), AppError> {
    let config = config_from_args(args)?;

    let mut charts = ChartSet::new();
    if config.plot {
        charts.push(Box::new(AsciiChart::new(config.plot_width, config.plot_height)));
    }
    if let Some(path) = &config.chart_svg {
        charts.push(Box::new(SvgChart::new(path, config.chart_svg_size)));
    }

    let run = pipeline::run_turnout(&config, &mut charts)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    let labels = crate::report::chart_labels(&config, run.plotted(), run.total_counties);
    charts.present(&labels)
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let key = crate::io::key::read_key_json(&args.key)?;

    let mut chart = AsciiChart::new(args.width, args.height);
    chart.draw_line(&key.series(), LineStyle::Reference);
    chart.present(&crate::report::key_chart_labels(&args.key))
}

/// Validate CLI arguments into a run configuration.
pub fn config_from_args(args: &RunArgs) -> Result<TurnoutConfig, AppError> {
    let election = ElectionYear::try_from(args.year)?;

    if args.min_voters == 0 {
        return Err(AppError::config("`--min-voters` must be at least 1."));
    }

    Ok(TurnoutConfig {
        data_file: args.data.clone(),
        key_file: args.key.clone(),
        election,
        region: args.region.clone(),
        minimum_registered_voters: args.min_voters,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        chart_svg: args.svg.clone(),
        chart_svg_size: (args.svg_width, args.svg_height),
        ..TurnoutConfig::default()
    })
}

/// Rewrite argv so `turnout` defaults to `turnout run`.
///
/// Rules:
/// - `turnout`                      -> `turnout run`
/// - `turnout --year 2016 ...`      -> `turnout run --year 2016 ...`
/// - `turnout --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::error::ErrorKind;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["turnout", "run"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Run(args) => args,
            Command::Plot(_) => panic!("expected run"),
        }
    }

    #[test]
    fn rewrite_defaults_to_run() {
        assert_eq!(rewrite_args(args(&["turnout"])), args(&["turnout", "run"]));
        assert_eq!(
            rewrite_args(args(&["turnout", "--year", "2016"])),
            args(&["turnout", "run", "--year", "2016"])
        );
        assert_eq!(
            rewrite_args(args(&["turnout", "plot", "--key", "k.json"])),
            args(&["turnout", "plot", "--key", "k.json"])
        );
        assert_eq!(rewrite_args(args(&["turnout", "--help"])), args(&["turnout", "--help"]));
    }

    #[test]
    fn config_defaults_match_constants() {
        let config = config_from_args(&run_args(&["--data", "v.txt", "--key", "k.json"])).unwrap();
        assert_eq!(config.election, ElectionYear::Y2020);
        assert_eq!(config.minimum_registered_voters, 50);
        assert_eq!((config.min_age, config.max_age), (18, 110));
        assert!(config.plot);
        assert_eq!(config.chart_svg, None);
    }

    #[test]
    fn unknown_year_is_rejected() {
        let err = config_from_args(&run_args(&["--year", "2018"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn age_bounds_are_not_cli_flags() {
        assert!(Cli::try_parse_from(["turnout", "run", "--min-age", "21"]).is_err());
        assert!(Cli::try_parse_from(["turnout", "run", "--max-age", "99"]).is_err());
    }
}
