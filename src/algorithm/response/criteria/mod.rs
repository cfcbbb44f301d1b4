//! Timepoint classification
//!
//! The classifier is the only indication-specific stage. Each criteria set
//! implements [`ResponseCriteria`], which grades a measurable value against
//! the baseline and nadir; the handling of missing baselines, subjects without
//! target lesions and the non-target signal is shared.

pub mod imwg;
pub mod palladini;
pub mod recist;

use serde::{Deserialize, Serialize};

use crate::algorithm::response::aggregate::NonTargetSignal;
use crate::algorithm::response::tracker::TrackerState;
use crate::config::{Indication, ResponseConfig};
use crate::models::{NonTargetCategory, ResponseGrade, TargetCategory};

pub use imwg::ImwgCriteria;
pub use palladini::PalladiniCriteria;
pub use recist::Recist11Criteria;

/// Absolute tolerance for comparisons against thresholds, so that sums of
/// decimal diameters such as `33.3 + 36.7` land on the boundary they denote
pub const TOLERANCE: f64 = 1e-9;

/// `value <= limit` within [`TOLERANCE`]
#[must_use]
pub fn at_most(value: f64, limit: f64) -> bool {
    value <= limit + TOLERANCE
}

/// `value >= limit` within [`TOLERANCE`]
#[must_use]
pub fn at_least(value: f64, limit: f64) -> bool {
    value >= limit - TOLERANCE
}

/// Threshold rules for one indication
pub trait ResponseCriteria: Send + Sync {
    /// Name of the criteria set
    fn name(&self) -> &'static str;

    /// Grade a measurable value.
    ///
    /// Called only when a baseline value exists and passes
    /// [`ResponseCriteria::is_evaluable_baseline`]; `nadir` is the nadir in
    /// effect before this timepoint.
    fn grade(
        &self,
        value: f64,
        baseline: f64,
        nadir: Option<f64>,
        config: &ResponseConfig,
    ) -> ResponseGrade;

    /// Whether a baseline value allows response assessment at all
    fn is_evaluable_baseline(&self, _baseline: f64, _config: &ResponseConfig) -> bool {
        true
    }
}

static RECIST_11: Recist11Criteria = Recist11Criteria;
static IMWG: ImwgCriteria = ImwgCriteria;
static PALLADINI: PalladiniCriteria = PalladiniCriteria;

/// Criteria implementation for an indication
#[must_use]
pub fn criteria_for(indication: Indication) -> &'static dyn ResponseCriteria {
    match indication {
        Indication::Recist11 => &RECIST_11,
        Indication::Imwg2025 => &IMWG,
        Indication::Palladini2012 => &PALLADINI,
    }
}

/// Target category with the grade it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAssessment {
    /// Category fed to the combination table
    pub category: TargetCategory,
    /// Indication-specific grade; `None` without target lesions
    pub grade: Option<ResponseGrade>,
}

impl TargetAssessment {
    /// Assessment carrying a grade
    #[must_use]
    pub const fn graded(grade: ResponseGrade) -> Self {
        Self {
            category: grade.category(),
            grade: Some(grade),
        }
    }

    /// The subject had no target lesions at baseline
    #[must_use]
    pub const fn no_targets() -> Self {
        Self {
            category: TargetCategory::NoTargets,
            grade: None,
        }
    }
}

/// Classify the target signal at one timepoint
#[must_use]
pub fn classify_target(
    criteria: &dyn ResponseCriteria,
    sld: Option<f64>,
    state: &TrackerState,
    config: &ResponseConfig,
) -> TargetAssessment {
    if !state.has_baseline() {
        return TargetAssessment::graded(ResponseGrade::Ne);
    }
    let Some(baseline) = state.baseline_sld else {
        if state.baseline_has_target {
            return TargetAssessment::graded(ResponseGrade::Ne);
        }
        return TargetAssessment::no_targets();
    };
    if !criteria.is_evaluable_baseline(baseline, config) {
        return TargetAssessment::graded(ResponseGrade::Ne);
    }
    match sld {
        Some(value) => {
            TargetAssessment::graded(criteria.grade(value, baseline, state.nadir_sld, config))
        }
        None => TargetAssessment::graded(ResponseGrade::Ne),
    }
}

/// Classify the non-target signal at one timepoint
#[must_use]
pub fn classify_non_target(
    signal: Option<NonTargetSignal>,
    state: &TrackerState,
) -> NonTargetCategory {
    match signal {
        Some(NonTargetSignal::AbsentAll) => NonTargetCategory::Cr,
        Some(NonTargetSignal::PresentNoProgression) => NonTargetCategory::NonCrNonPd,
        Some(NonTargetSignal::UnequivocalProgression) => NonTargetCategory::Pd,
        None if state.has_baseline() && !state.baseline_has_non_target => {
            NonTargetCategory::NoneAtBaseline
        }
        None => NonTargetCategory::NotEvaluated,
    }
}
