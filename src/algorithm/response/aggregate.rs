//! Lesion aggregation
//!
//! Reduces one subject's per-lesion records into a single
//! [`TimepointAggregate`] per assessment day: the sum of target diameters, the
//! most severe non-target signal, and whether a new lesion was reported.

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::models::{
    DataQualityFlag, DayOrderIssue, LesionRegistry, LesionResult, LesionRole, Measurement,
};

/// Qualitative non-target signal at one day, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NonTargetSignal {
    /// Every assessed non-target lesion is absent
    AbsentAll,
    /// At least one non-target lesion persists, none progressed
    PresentNoProgression,
    /// At least one non-target lesion progressed unequivocally
    UnequivocalProgression,
}

impl NonTargetSignal {
    /// Signal contributed by a single non-target result
    #[must_use]
    pub const fn from_result(result: LesionResult) -> Option<Self> {
        match result {
            LesionResult::Absent => Some(Self::AbsentAll),
            LesionResult::Present | LesionResult::Diameter(_) => Some(Self::PresentNoProgression),
            LesionResult::Progression => Some(Self::UnequivocalProgression),
            LesionResult::NotAssessed => None,
        }
    }
}

/// All lesion results for one subject at one assessment day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimepointAggregate {
    /// Subject identifier
    pub subject_id: String,
    /// Study day
    pub day: i32,
    /// Sum of target diameters; `None` when no target lesion had a numeric value
    pub sld: Option<f64>,
    /// Number of target lesions contributing to `sld`
    pub target_count: usize,
    /// Any target lesion was recorded on this day, assessed or not
    pub has_target_records: bool,
    /// Most severe non-target signal; `None` when no non-target lesion was assessed
    pub non_target: Option<NonTargetSignal>,
    /// A new lesion was reported on this day
    pub new_lesion: bool,
    /// Any record on this day carried the screening marker
    pub screening: bool,
}

impl TimepointAggregate {
    /// Whether this day carries any target or non-target result
    #[must_use]
    pub fn has_disease_data(&self) -> bool {
        self.target_count > 0 || self.non_target.is_some()
    }
}

/// Aggregates for one subject, ascending by day, plus flags raised on the way
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One aggregate per distinct assessment day
    pub aggregates: Vec<TimepointAggregate>,
    /// Orphan and day-ordering flags
    pub flags: Vec<DataQualityFlag>,
}

#[derive(Debug, Clone, Copy)]
struct Resolved<'a> {
    measurement: &'a Measurement,
    role: LesionRole,
}

/// Aggregate one subject's measurements by assessment day.
///
/// Roles are taken from the measurement or, failing that, from `registry`;
/// measurements with no resolvable role are skipped and flagged. When the same
/// lesion is reported twice on one day the record that arrived last is kept.
#[must_use]
pub fn aggregate_subject(
    measurements: &[Measurement],
    registry: Option<&LesionRegistry>,
) -> Aggregation {
    let Some(first) = measurements.first() else {
        return Aggregation::default();
    };
    let subject_id = first.subject_id.as_str();

    let mut flags = Vec::new();
    let mut resolved: Vec<Resolved<'_>> = Vec::with_capacity(measurements.len());
    let mut slots: FxHashMap<(&str, i32), usize> = FxHashMap::default();
    let mut latest_day: FxHashMap<&str, i32> = FxHashMap::default();
    let mut reordered: FxHashSet<&str> = FxHashSet::default();

    for measurement in measurements {
        let role = match registry {
            Some(registry) => registry.resolve(measurement),
            None => measurement.role,
        };
        let Some(role) = role else {
            flags.push(DataQualityFlag::OrphanMeasurement {
                lesion_id: measurement.lesion_id.clone(),
                day: measurement.day,
            });
            continue;
        };

        let lesion_id = measurement.lesion_id.as_str();
        let seen = latest_day.entry(lesion_id).or_insert(measurement.day);
        if measurement.day < *seen {
            if reordered.insert(lesion_id) {
                flags.push(DataQualityFlag::NonMonotonicDays {
                    lesion_id: lesion_id.to_string(),
                    day: measurement.day,
                    issue: DayOrderIssue::OutOfOrder,
                });
            }
        } else {
            *seen = measurement.day;
        }

        let record = Resolved { measurement, role };
        match slots.get(&(lesion_id, measurement.day)) {
            Some(&slot) => {
                flags.push(DataQualityFlag::NonMonotonicDays {
                    lesion_id: lesion_id.to_string(),
                    day: measurement.day,
                    issue: DayOrderIssue::Duplicate,
                });
                resolved[slot] = record;
            }
            None => {
                slots.insert((lesion_id, measurement.day), resolved.len());
                resolved.push(record);
            }
        }
    }

    let by_day = resolved
        .into_iter()
        .sorted_by_key(|record| record.measurement.day)
        .chunk_by(|record| record.measurement.day);

    let aggregates = by_day
        .into_iter()
        .map(|(day, records)| build_aggregate(subject_id, day, records.collect()))
        .collect();

    Aggregation { aggregates, flags }
}

fn build_aggregate(
    subject_id: &str,
    day: i32,
    records: SmallVec<[Resolved<'_>; 16]>,
) -> TimepointAggregate {
    let target_values: SmallVec<[f64; 16]> = records
        .iter()
        .filter(|record| record.role == LesionRole::Target)
        .filter_map(|record| record.measurement.result.numeric())
        .collect();

    let non_target = records
        .iter()
        .filter(|record| record.role == LesionRole::NonTarget)
        .filter_map(|record| NonTargetSignal::from_result(record.measurement.result))
        .max();

    TimepointAggregate {
        subject_id: subject_id.to_string(),
        day,
        sld: (!target_values.is_empty()).then(|| target_values.iter().sum()),
        target_count: target_values.len(),
        has_target_records: records
            .iter()
            .any(|record| record.role == LesionRole::Target),
        non_target,
        new_lesion: records.iter().any(|record| record.role == LesionRole::New),
        screening: records.iter().any(|record| record.measurement.screening),
    }
}
