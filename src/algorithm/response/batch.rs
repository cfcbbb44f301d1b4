//! Parallel batch evaluation
//!
//! Subjects are independent, so the batch fans out one task per subject over
//! the Rayon pool. Results are gathered in sorted subject order so reports are
//! stable across runs.

use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::response::{SubjectEvaluation, SubjectOutcome, evaluate_subject};
use crate::collections::MeasurementCollection;
use crate::config::ResponseConfig;
use crate::error::Result;
use crate::models::{BestOverallResponse, LesionRegistry, OverallResponse};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
};

/// Results of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Evaluated subjects, sorted by subject identifier
    pub evaluations: Vec<SubjectEvaluation>,
    /// Subjects excluded because no usable measurement remained
    pub no_data: Vec<String>,
    /// Wall-clock time of the run
    #[serde(skip)]
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of evaluated subjects
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.evaluations.len()
    }

    /// Evaluation for a subject
    #[must_use]
    pub fn get(&self, subject_id: &str) -> Option<&SubjectEvaluation> {
        self.evaluations
            .binary_search_by(|evaluation| evaluation.subject_id.as_str().cmp(subject_id))
            .ok()
            .map(|index| &self.evaluations[index])
    }

    /// Best overall response of every evaluated subject
    pub fn best_responses(&self) -> impl Iterator<Item = &BestOverallResponse> {
        self.evaluations.iter().map(|evaluation| &evaluation.best)
    }

    /// Subjects carrying at least one data-quality flag
    #[must_use]
    pub fn flagged_subjects(&self) -> Vec<&str> {
        self.evaluations
            .iter()
            .filter(|evaluation| evaluation.is_flagged())
            .map(|evaluation| evaluation.subject_id.as_str())
            .collect()
    }

    /// Number of subjects per best overall response category
    #[must_use]
    pub fn category_counts(&self) -> FxHashMap<OverallResponse, usize> {
        let mut counts = FxHashMap::default();
        for best in self.best_responses() {
            *counts.entry(best.category).or_insert(0) += 1;
        }
        counts
    }

    /// Objective response rate (confirmed CR or PR) among evaluated subjects
    #[must_use]
    pub fn objective_response_rate(&self) -> Option<f64> {
        if self.evaluations.is_empty() {
            return None;
        }
        let responders = self
            .best_responses()
            .filter(|best| best.is_objective_response())
            .count();
        Some(responders as f64 / self.evaluations.len() as f64)
    }
}

/// Evaluate every subject in the collection
///
/// The configuration is validated once up front. Data-quality problems never
/// abort the batch; they are attached to the affected subject.
pub fn evaluate_batch(
    measurements: &MeasurementCollection,
    registry: Option<&LesionRegistry>,
    config: &ResponseConfig,
) -> Result<BatchReport> {
    config.validate()?;

    let start = Instant::now();
    let subject_ids = measurements.subject_ids();
    log_operation_start(
        &format!("Evaluating {} subjects under {}", subject_ids.len(), config.indication),
        measurements.measurement_count(),
    );

    let pb = if config.show_progress {
        create_main_progress_bar(subject_ids.len() as u64, Some("Evaluating subjects"))
    } else {
        ProgressBar::hidden()
    };

    let outcomes: Vec<SubjectOutcome> = subject_ids
        .par_iter()
        .map(|subject_id| {
            let outcome = evaluate_subject(
                subject_id,
                measurements.measurements_for(subject_id),
                registry,
                config,
            );
            pb.inc(1);
            outcome
        })
        .collect();

    finish_progress_bar(&pb, Some("Evaluation complete"));

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            SubjectOutcome::Evaluated(evaluation) => report.evaluations.push(evaluation),
            SubjectOutcome::NoData { subject_id, .. } => report.no_data.push(subject_id),
        }
    }
    report.elapsed = start.elapsed();

    log_operation_complete("evaluated", report.subject_count(), Some(report.elapsed));
    if !report.no_data.is_empty() {
        log::warn!(
            "{} subjects had no usable measurements and were excluded",
            report.no_data.len()
        );
    }

    Ok(report)
}
