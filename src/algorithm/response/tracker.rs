//! Baseline and nadir tracking
//!
//! A single forward scan over a subject's aggregates, ascending by day. The
//! [`TrackerState`] is a small `Copy` value threaded through the scan; every
//! timepoint is classified against the state as it stood *before* that
//! timepoint was observed.

use serde::{Deserialize, Serialize};

use crate::algorithm::response::aggregate::TimepointAggregate;
use crate::config::{BaselinePolicy, ResponseConfig};
use crate::models::DataQualityFlag;

/// Per-subject reference values for classification
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerState {
    /// Day of the baseline assessment
    pub baseline_day: Option<i32>,
    /// Baseline sum of diameters; `None` if there is no baseline or no
    /// baseline target lesion had a numeric value
    pub baseline_sld: Option<f64>,
    /// The baseline assessment recorded target lesions, measured or not
    pub baseline_has_target: bool,
    /// The baseline assessment reported non-target lesions
    pub baseline_has_non_target: bool,
    /// Lowest eligible value observed so far
    pub nadir_sld: Option<f64>,
    /// Day the nadir was observed
    pub nadir_day: Option<i32>,
}

impl TrackerState {
    /// State right after the baseline assessment
    #[must_use]
    pub fn at_baseline(baseline: &TimepointAggregate, nadir_excludes_baseline: bool) -> Self {
        let seed_nadir = baseline.sld.filter(|_| !nadir_excludes_baseline);
        Self {
            baseline_day: Some(baseline.day),
            baseline_sld: baseline.sld,
            baseline_has_target: baseline.has_target_records,
            baseline_has_non_target: baseline.non_target.is_some(),
            nadir_sld: seed_nadir,
            nadir_day: seed_nadir.map(|_| baseline.day),
        }
    }

    /// Whether a baseline has been established
    #[must_use]
    pub const fn has_baseline(&self) -> bool {
        self.baseline_day.is_some()
    }

    /// Fold one post-baseline observation into the state
    #[must_use]
    pub fn observe(self, day: i32, sld: Option<f64>) -> Self {
        match (sld, self.nadir_sld) {
            (Some(value), Some(nadir)) if value >= nadir => self,
            (Some(value), _) => Self {
                nadir_sld: Some(value),
                nadir_day: Some(day),
                ..self
            },
            (None, _) => self,
        }
    }

    /// Percent change of `sld` from baseline
    #[must_use]
    pub fn pct_change_from_baseline(&self, sld: Option<f64>) -> Option<f64> {
        percent_change(sld?, self.baseline_sld?)
    }

    /// Percent change of `sld` from the nadir in effect
    #[must_use]
    pub fn pct_change_from_nadir(&self, sld: Option<f64>) -> Option<f64> {
        percent_change(sld?, self.nadir_sld?)
    }
}

fn percent_change(value: f64, reference: f64) -> Option<f64> {
    (reference > 0.0).then(|| (value - reference) / reference * 100.0)
}

/// A post-baseline aggregate with the state it is classified against
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedTimepoint {
    /// The assessment
    pub aggregate: TimepointAggregate,
    /// Tracker state before this assessment was observed
    pub state: TrackerState,
}

/// Result of scanning one subject's aggregates
#[derive(Debug, Clone, Default)]
pub struct TrackedSeries {
    /// The aggregate selected as baseline
    pub baseline: Option<TimepointAggregate>,
    /// Post-baseline timepoints, ascending by day. Without a baseline every
    /// aggregate appears here with an empty state.
    pub timepoints: Vec<TrackedTimepoint>,
    /// State after the last timepoint
    pub final_state: TrackerState,
    /// `NO_BASELINE` and `NADIR_EXCEEDS_BASELINE` flags
    pub flags: Vec<DataQualityFlag>,
}

/// Index of the baseline aggregate under `policy`.
///
/// `aggregates` must be ascending by day. Only days with target or non-target
/// data qualify.
#[must_use]
pub fn select_baseline(aggregates: &[TimepointAggregate], policy: BaselinePolicy) -> Option<usize> {
    match policy {
        BaselinePolicy::Pretreat => aggregates
            .iter()
            .rposition(|agg| (agg.day < 1 || agg.screening) && agg.has_disease_data()),
        BaselinePolicy::First => aggregates.iter().position(TimepointAggregate::has_disease_data),
    }
}

/// Establish the baseline and track the nadir over a subject's aggregates
#[must_use]
pub fn track(aggregates: &[TimepointAggregate], config: &ResponseConfig) -> TrackedSeries {
    debug_assert!(
        aggregates.windows(2).all(|pair| pair[0].day < pair[1].day),
        "aggregates must be strictly ascending by day"
    );

    let Some(baseline_index) = select_baseline(aggregates, config.baseline_policy) else {
        return TrackedSeries {
            baseline: None,
            timepoints: aggregates
                .iter()
                .map(|aggregate| TrackedTimepoint {
                    aggregate: aggregate.clone(),
                    state: TrackerState::default(),
                })
                .collect(),
            final_state: TrackerState::default(),
            flags: vec![DataQualityFlag::NoBaseline],
        };
    };

    let baseline = &aggregates[baseline_index];
    let mut state = TrackerState::at_baseline(baseline, config.nadir_excludes_baseline);
    let mut flags = Vec::new();
    let mut timepoints = Vec::with_capacity(aggregates.len() - baseline_index - 1);

    for aggregate in &aggregates[baseline_index + 1..] {
        timepoints.push(TrackedTimepoint {
            aggregate: aggregate.clone(),
            state,
        });

        let next = state.observe(aggregate.day, aggregate.sld);
        debug_assert!(match (state.nadir_sld, next.nadir_sld) {
            (Some(before), Some(after)) => after <= before,
            (Some(_), None) => false,
            _ => true,
        });

        if let (Some(nadir_sld), Some(baseline_sld), Some(day)) =
            (next.nadir_sld, next.baseline_sld, next.nadir_day)
        {
            let already_flagged = flags
                .iter()
                .any(|flag| matches!(flag, DataQualityFlag::NadirExceedsBaseline { .. }));
            if nadir_sld > baseline_sld && !already_flagged {
                flags.push(DataQualityFlag::NadirExceedsBaseline {
                    day,
                    nadir_sld,
                    baseline_sld,
                });
            }
        }

        state = next;
    }

    TrackedSeries {
        baseline: Some(baseline.clone()),
        timepoints,
        final_state: state,
        flags,
    }
}
