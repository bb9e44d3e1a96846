//! Formatted terminal output and chart labels.
//!
//! We keep formatting code in one place so:
//! - the turnout code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::TurnoutConfig;
use crate::io::ingest::IngestSummary;
use crate::plot::ChartLabels;

const Y_LABEL: &str = "Normalized voter turnout (votes / registered voters / overall turnout fraction)";

/// Ingest counters, one fact per line.
pub fn format_ingest_summary(summary: &IngestSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("processed {} rows.\n", summary.rows));
    out.push_str(&format!(
        "processed {} voters in {} counties.\n",
        summary.voters, summary.counties
    ));
    match summary.overall_turnout() {
        Some(t) => out.push_str(&format!(
            "overall turnout: {t:.4} (total votes: {})\n",
            summary.votes
        )),
        None => out.push_str("overall turnout: n/a (no voters recorded)\n"),
    }

    let s = &summary.skipped;
    if s.total() > 0 {
        out.push_str(&format!(
            "skipped {} rows: no registration={}, late registration={}, no birth date={}, under age={}, implausible age={}, malformed={}\n",
            s.total(),
            s.missing_registration,
            s.late_registration,
            s.missing_birthdate,
            s.underage,
            s.implausible_age,
            s.malformed,
        ));
    }
    out
}

/// Full run summary: ingest counters, plotted counties, key size.
pub fn format_run_summary(run: &RunOutput, config: &TurnoutConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== turnout - {} {} General Election ===\n",
        config.region, config.election
    ));
    out.push_str(&format!("Election tag: {}\n", config.election.tag()));
    out.push_str(&format_ingest_summary(&run.summary));
    out.push_str(&format!(
        "plotted {} of {} counties (minimum {} registered voters per age).\n",
        run.plotted(),
        run.total_counties,
        config.minimum_registered_voters
    ));
    out.push_str(&format!(
        "reference key: {} ages -> {}\n",
        run.key.len(),
        config.key_file.display()
    ));
    out
}

/// Labels for the county comparison chart.
pub fn chart_labels(config: &TurnoutConfig, plotted: usize, total_counties: usize) -> ChartLabels {
    ChartLabels {
        title: format!(
            "{} {} Voter Turnout vs. Age ({plotted} of {total_counties} counties; each line = 1 county)",
            config.election, config.region
        ),
        x_label: format!(
            "Age (ages with less than {} registered voters are hidden)",
            config.minimum_registered_voters
        ),
        y_label: Y_LABEL.to_string(),
    }
}

/// Labels for a chart of a saved key file.
pub fn key_chart_labels(path: &Path) -> ChartLabels {
    ChartLabels {
        title: format!("Reference key: {}", path.display()),
        x_label: "Age".to_string(),
        y_label: Y_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElectionYear;
    use crate::io::ingest::SkipCounts;

    #[test]
    fn ingest_summary_lines() {
        let summary = IngestSummary {
            rows: 10,
            voters: 8,
            votes: 6,
            counties: 2,
            skipped: SkipCounts {
                missing_birthdate: 1,
                underage: 1,
                ..SkipCounts::default()
            },
        };
        let txt = format_ingest_summary(&summary);
        assert!(txt.contains("processed 10 rows.\n"));
        assert!(txt.contains("processed 8 voters in 2 counties.\n"));
        assert!(txt.contains("overall turnout: 0.7500 (total votes: 6)\n"));
        assert!(txt.contains("skipped 2 rows"));
    }

    #[test]
    fn zero_voters_has_no_turnout() {
        let txt = format_ingest_summary(&IngestSummary::default());
        assert!(txt.contains("overall turnout: n/a"));
        assert!(!txt.contains("skipped"));
    }

    #[test]
    fn chart_labels_state_threshold_and_counts() {
        let config = TurnoutConfig {
            election: ElectionYear::Y2016,
            ..TurnoutConfig::default()
        };
        let labels = chart_labels(&config, 97, 115);
        assert_eq!(
            labels.title,
            "2016 Missouri Voter Turnout vs. Age (97 of 115 counties; each line = 1 county)"
        );
        assert_eq!(
            labels.x_label,
            "Age (ages with less than 50 registered voters are hidden)"
        );
        assert!(labels.y_label.contains("overall turnout fraction"));
    }
}
