//! Shared turnout pipeline used by the CLI.
//!
//! Keeping this in one place keeps the core workflow in one readable fold:
//! TSV ingest -> per county (group by age -> normalized turnout -> chart line -> key) -> key file
//!
//! The chart is a collaborator: the pipeline draws lines into it, the caller
//! labels and presents it.

use tracing::{debug, info};

use crate::domain::{CountyCurve, ReferenceKey, TurnoutConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestSummary, IngestedVoters, load_voters};
use crate::io::key::write_key_json;
use crate::plot::{ChartRenderer, LineStyle};
use crate::turnout::{KeyBuilder, compute_turnout, group_by_age, weighted_mean};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub summary: IngestSummary,
    /// Counties with a curve, in county order.
    pub curves: Vec<CountyCurve>,
    /// Counties with voters but no qualifying age.
    pub skipped_counties: Vec<String>,
    pub key: ReferenceKey,
    pub total_counties: usize,
}

impl RunOutput {
    pub fn plotted(&self) -> usize {
        self.curves.len()
    }
}

/// Ingest the configured file, compute every county, persist the key.
pub fn run_turnout(config: &TurnoutConfig, chart: &mut dyn ChartRenderer) -> Result<RunOutput, AppError> {
    let ingest = load_voters(config)?;
    let run = analyze_counties(ingest, config, chart);
    write_key_json(&config.key_file, &run.key)?;
    Ok(run)
}

/// Compute curves county by county, drawing each one and folding it into the key.
pub fn analyze_counties(
    ingest: IngestedVoters,
    config: &TurnoutConfig,
    chart: &mut dyn ChartRenderer,
) -> RunOutput {
    let IngestedVoters { counties, summary } = ingest;
    let total_counties = counties.len();

    let (curves, skipped_counties, builder) = counties.into_iter().fold(
        (Vec::new(), Vec::new(), KeyBuilder::new()),
        |(mut curves, mut skipped, mut builder), (county, facts)| {
            let by_age = group_by_age(&facts);
            match compute_turnout(&by_age, config.minimum_registered_voters) {
                Some(curve) => {
                    debug!(
                        county = %county,
                        voters = curve.total_samples,
                        ages = curve.points.len(),
                        weighted_mean = weighted_mean(&curve),
                        "plotting county"
                    );
                    chart.draw_line(&curve.series(), LineStyle::County);
                    builder.add_curve(&curve);
                    curves.push(CountyCurve { county, curve });
                }
                None => {
                    debug!(county = %county, voters = facts.len(), "no qualifying ages; county skipped");
                    skipped.push(county);
                }
            }
            (curves, skipped, builder)
        },
    );

    let key = builder.finish();
    if !key.is_empty() {
        chart.draw_line(&key.series(), LineStyle::Reference);
    }

    info!(
        plotted = curves.len(),
        total = total_counties,
        key_ages = key.len(),
        "counties processed"
    );

    RunOutput {
        summary,
        curves,
        skipped_counties,
        key,
        total_counties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountyBuckets, VoterFact};
    use crate::plot::ChartLabels;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(Vec<(f64, f64)>, LineStyle)>,
    }

    impl ChartRenderer for Recorder {
        fn draw_line(&mut self, points: &[(f64, f64)], style: LineStyle) {
            self.lines.push((points.to_vec(), style));
        }

        fn present(&mut self, _labels: &ChartLabels) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn facts(age: u32, samples: usize, votes: usize) -> Vec<VoterFact> {
        (0..samples)
            .map(|i| VoterFact { age, voted: i < votes })
            .collect()
    }

    fn ingested(counties: CountyBuckets) -> IngestedVoters {
        let voters = counties.values().map(Vec::len).sum();
        let votes = counties.values().flatten().filter(|f| f.voted).count();
        IngestedVoters {
            summary: IngestSummary {
                rows: voters,
                voters,
                votes,
                counties: counties.len(),
                ..IngestSummary::default()
            },
            counties,
        }
    }

    #[test]
    fn key_averages_counties_and_skips_small_ones() {
        let mut counties = CountyBuckets::new();
        // Adair: 25 -> 0.8, 40 -> 1.2
        let mut adair = facts(25, 60, 30);
        adair.extend(facts(40, 60, 45));
        counties.insert("Adair".to_string(), adair);
        // Boone: 25 -> 1.2, 40 -> 0.8
        let mut boone = facts(25, 60, 45);
        boone.extend(facts(40, 60, 30));
        counties.insert("Boone".to_string(), boone);
        // Clark: too small everywhere.
        counties.insert("Clark".to_string(), facts(33, 49, 20));

        let mut chart = Recorder::default();
        let run = analyze_counties(ingested(counties), &TurnoutConfig::default(), &mut chart);

        assert_eq!(run.total_counties, 3);
        assert_eq!(run.plotted(), 2);
        assert_eq!(run.skipped_counties, vec!["Clark".to_string()]);
        assert!((run.key.get(25).unwrap() - 1.0).abs() < 1e-12);
        assert!((run.key.get(40).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(run.key.get(33), None);

        let styles: Vec<LineStyle> = chart.lines.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            styles,
            vec![LineStyle::County, LineStyle::County, LineStyle::Reference]
        );

        // Adair's line: ascending ages, normalized values.
        let adair = &chart.lines[0].0;
        assert_eq!(adair.len(), 2);
        assert_eq!((adair[0].0, adair[1].0), (25.0, 40.0));
        assert!((adair[0].1 - 0.8).abs() < 1e-12);
        assert!((adair[1].1 - 1.2).abs() < 1e-12);
    }

    #[test]
    fn no_curves_means_empty_key_and_no_reference_line() {
        let mut counties = CountyBuckets::new();
        counties.insert("Clark".to_string(), facts(33, 10, 5));

        let mut chart = Recorder::default();
        let run = analyze_counties(ingested(counties), &TurnoutConfig::default(), &mut chart);

        assert_eq!(run.plotted(), 0);
        assert!(run.key.is_empty());
        assert!(chart.lines.is_empty());
    }
}
