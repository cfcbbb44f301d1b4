//! Best overall response derivation
//!
//! This module implements the per-subject response pipeline:
//!
//! 1. Lesion aggregation into one record per assessment day
//! 2. Baseline selection and nadir tracking
//! 3. Timepoint classification with indication-specific criteria
//! 4. Combination of target, non-target and new-lesion signals
//! 5. Confirmation of CR/PR and stable-disease duration
//! 6. Selection of the best overall response
//!
//! Each stage only consumes the previous stage's output and the
//! [`ResponseConfig`]. Subjects never share state, so a batch can evaluate them
//! in parallel (see [`batch`]).

pub mod aggregate;
pub mod batch;
pub mod combine;
pub mod confirm;
pub mod criteria;
pub mod quality;
pub mod select;
pub mod tracker;

use serde::{Deserialize, Serialize};

use crate::config::{Indication, ResponseConfig};
use crate::models::{
    BestOverallResponse, ConfirmedResponse, DataQualityFlag, LesionRegistry, Measurement,
    TimepointResponse,
};
use crate::utils::logging::log_flags;

// Re-export key types
pub use aggregate::{Aggregation, NonTargetSignal, TimepointAggregate, aggregate_subject};
pub use batch::{BatchReport, evaluate_batch};
pub use combine::combine;
pub use confirm::confirm_responses;
pub use criteria::{ResponseCriteria, TargetAssessment, criteria_for};
pub use select::select_best;
pub use tracker::{TrackedSeries, TrackedTimepoint, TrackerState, track};

/// Complete evaluation of one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEvaluation {
    /// Subject identifier
    pub subject_id: String,
    /// Criteria set used
    pub indication: Indication,
    /// Day of the baseline assessment
    pub baseline_day: Option<i32>,
    /// Baseline value
    pub baseline_sld: Option<f64>,
    /// Final nadir
    pub nadir_sld: Option<f64>,
    /// Day of the final nadir
    pub nadir_day: Option<i32>,
    /// Per-timepoint trail, ascending by day
    pub timepoints: Vec<ConfirmedResponse>,
    /// Best overall response
    pub best: BestOverallResponse,
    /// Data-quality flags raised for this subject
    pub flags: Vec<DataQualityFlag>,
}

impl SubjectEvaluation {
    /// Whether any data-quality flag was raised
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Whether a flag with the given code was raised
    #[must_use]
    pub fn has_flag(&self, code: &str) -> bool {
        self.flags.iter().any(|flag| flag.code() == code)
    }

    /// Confirmed response at a given day
    #[must_use]
    pub fn timepoint(&self, day: i32) -> Option<&ConfirmedResponse> {
        self.timepoints.iter().find(|tp| tp.day() == day)
    }
}

/// Outcome of evaluating one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubjectOutcome {
    /// The subject had usable measurements
    Evaluated(SubjectEvaluation),
    /// No usable measurement remained; the subject is excluded from results
    NoData {
        /// Subject identifier
        subject_id: String,
        /// Flags raised while discarding measurements
        flags: Vec<DataQualityFlag>,
    },
}

impl SubjectOutcome {
    /// Subject identifier
    #[must_use]
    pub fn subject_id(&self) -> &str {
        match self {
            Self::Evaluated(evaluation) => &evaluation.subject_id,
            Self::NoData { subject_id, .. } => subject_id,
        }
    }

    /// The evaluation, if the subject had data
    #[must_use]
    pub fn evaluation(&self) -> Option<&SubjectEvaluation> {
        match self {
            Self::Evaluated(evaluation) => Some(evaluation),
            Self::NoData { .. } => None,
        }
    }
}

/// Classify one tracked timepoint
#[must_use]
pub fn classify_timepoint(
    criteria: &dyn ResponseCriteria,
    timepoint: &TrackedTimepoint,
    config: &ResponseConfig,
) -> TimepointResponse {
    let aggregate = &timepoint.aggregate;
    let state = &timepoint.state;

    let target = criteria::classify_target(criteria, aggregate.sld, state, config);
    let non_target = criteria::classify_non_target(aggregate.non_target, state);
    // A lesion is only new relative to an established baseline
    let new_lesion =
        aggregate.new_lesion && state.baseline_day.is_some_and(|day| aggregate.day > day);

    TimepointResponse {
        subject_id: aggregate.subject_id.clone(),
        day: aggregate.day,
        sld: aggregate.sld,
        baseline_sld: state.baseline_sld,
        nadir_sld: state.nadir_sld,
        pct_change_baseline: state.pct_change_from_baseline(aggregate.sld),
        pct_change_nadir: state.pct_change_from_nadir(aggregate.sld),
        target: target.category,
        grade: target.grade,
        non_target,
        new_lesion,
        overall: combine(target.category, non_target, new_lesion),
    }
}

/// Evaluate one subject's measurements end to end
#[must_use]
pub fn evaluate_subject(
    subject_id: &str,
    measurements: &[Measurement],
    registry: Option<&LesionRegistry>,
    config: &ResponseConfig,
) -> SubjectOutcome {
    let Aggregation {
        aggregates,
        mut flags,
    } = aggregate_subject(measurements, registry);

    if aggregates.is_empty() {
        log::warn!("{subject_id}: no usable measurements, excluded from results");
        log_flags(subject_id, &flags);
        return SubjectOutcome::NoData {
            subject_id: subject_id.to_string(),
            flags,
        };
    }

    let series = track(&aggregates, config);
    flags.extend(series.flags.iter().cloned());
    flags.extend(quality::implausible_deltas(&series, config.plausibility_ratio));

    let criteria = criteria_for(config.indication);
    let responses: Vec<TimepointResponse> = series
        .timepoints
        .iter()
        .map(|timepoint| classify_timepoint(criteria, timepoint, config))
        .collect();

    let final_state = series.final_state;
    let timepoints = confirm_responses(responses, final_state.baseline_day, config);
    let best = select_best(subject_id, &timepoints, config);

    log::debug!(
        "{subject_id}: {} timepoints under {}, best response {}",
        timepoints.len(),
        criteria.name(),
        best.category
    );
    log_flags(subject_id, &flags);

    SubjectOutcome::Evaluated(SubjectEvaluation {
        subject_id: subject_id.to_string(),
        indication: config.indication,
        baseline_day: final_state.baseline_day,
        baseline_sld: final_state.baseline_sld,
        nadir_sld: final_state.nadir_sld,
        nadir_day: final_state.nadir_day,
        timepoints,
        best,
        flags,
    })
}
