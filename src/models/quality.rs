//! Data-quality flags attached to a subject's evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a day-ordering problem was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOrderIssue {
    /// The same lesion was reported twice on one day; the record that
    /// arrived last was kept
    Duplicate,
    /// The lesion's assessments arrived out of day order and were re-sorted
    OutOfOrder,
}

/// Recoverable data-quality condition found while evaluating a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQualityFlag {
    /// No record qualified as baseline under the configured policy
    NoBaseline,
    /// The running nadir rose above the baseline value
    NadirExceedsBaseline {
        /// Day the nadir was set
        day: i32,
        /// Nadir value
        nadir_sld: f64,
        /// Baseline value
        baseline_sld: f64,
    },
    /// Duplicate or out-of-order assessment days for a lesion
    NonMonotonicDays {
        /// Affected lesion
        lesion_id: String,
        /// Day of the offending record
        day: i32,
        /// How it was resolved
        issue: DayOrderIssue,
    },
    /// Change between consecutive evaluable values exceeds the plausibility ratio
    ImplausibleDelta {
        /// Day of the later assessment
        day: i32,
        /// Previous evaluable value
        previous_sld: f64,
        /// Current value
        sld: f64,
        /// Relative change `|sld - previous| / previous`
        ratio: f64,
    },
    /// Measurement whose lesion role could not be resolved; skipped
    OrphanMeasurement {
        /// Lesion identifier
        lesion_id: String,
        /// Day of the measurement
        day: i32,
    },
}

impl DataQualityFlag {
    /// Stable code for reporting
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoBaseline => "NO_BASELINE",
            Self::NadirExceedsBaseline { .. } => "NADIR_EXCEEDS_BASELINE",
            Self::NonMonotonicDays { .. } => "NON_MONOTONIC_DAYS",
            Self::ImplausibleDelta { .. } => "IMPLAUSIBLE_DELTA",
            Self::OrphanMeasurement { .. } => "ORPHAN_MEASUREMENT",
        }
    }
}

impl fmt::Display for DataQualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBaseline => write!(f, "NO_BASELINE: no eligible baseline assessment"),
            Self::NadirExceedsBaseline {
                day,
                nadir_sld,
                baseline_sld,
            } => write!(
                f,
                "NADIR_EXCEEDS_BASELINE: nadir {nadir_sld} on day {day} > baseline {baseline_sld}"
            ),
            Self::NonMonotonicDays {
                lesion_id,
                day,
                issue,
            } => write!(
                f,
                "NON_MONOTONIC_DAYS: lesion {lesion_id} day {day} ({issue:?})"
            ),
            Self::ImplausibleDelta {
                day,
                previous_sld,
                sld,
                ratio,
            } => write!(
                f,
                "IMPLAUSIBLE_DELTA: day {day} changed {previous_sld} -> {sld} ({:.1}%)",
                ratio * 100.0
            ),
            Self::OrphanMeasurement { lesion_id, day } => write!(
                f,
                "ORPHAN_MEASUREMENT: lesion {lesion_id} on day {day} has no role"
            ),
        }
    }
}
