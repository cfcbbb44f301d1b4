//! Measurement collection
//!
//! This module provides the per-subject index consumed by batch evaluation.

use rustc_hash::FxHashMap;

use crate::models::Measurement;

/// Measurements grouped by subject
#[derive(Debug, Clone, Default)]
pub struct MeasurementCollection {
    /// Measurements by subject identifier, in arrival order
    by_subject: FxHashMap<String, Vec<Measurement>>,
    /// Total number of measurements
    count: usize,
}

impl MeasurementCollection {
    /// Create a new empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from a vector of measurements
    #[must_use]
    pub fn from_measurements(measurements: Vec<Measurement>) -> Self {
        let mut collection = Self::new();
        for measurement in measurements {
            collection.add(measurement);
        }
        collection
    }

    /// Add a measurement, keeping arrival order within its subject
    pub fn add(&mut self, measurement: Measurement) {
        self.by_subject
            .entry(measurement.subject_id.clone())
            .or_default()
            .push(measurement);
        self.count += 1;
    }

    /// Register a subject on the roster even if it has no measurements
    pub fn register_subject(&mut self, subject_id: impl Into<String>) {
        self.by_subject.entry(subject_id.into()).or_default();
    }

    /// All subject identifiers, sorted
    #[must_use]
    pub fn subject_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.by_subject.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Measurements for a subject, in arrival order
    #[must_use]
    pub fn measurements_for(&self, subject_id: &str) -> &[Measurement] {
        self.by_subject.get(subject_id).map_or(&[], Vec::as_slice)
    }

    /// Whether the subject is on the roster
    #[must_use]
    pub fn contains_subject(&self, subject_id: &str) -> bool {
        self.by_subject.contains_key(subject_id)
    }

    /// Number of subjects on the roster
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_subject.len()
    }

    /// Whether the roster is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }

    /// Total number of measurements across subjects
    #[must_use]
    pub const fn measurement_count(&self) -> usize {
        self.count
    }
}

impl FromIterator<Measurement> for MeasurementCollection {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        let mut collection = Self::new();
        for measurement in iter {
            collection.add(measurement);
        }
        collection
    }
}

impl Extend<Measurement> for MeasurementCollection {
    fn extend<I: IntoIterator<Item = Measurement>>(&mut self, iter: I) {
        for measurement in iter {
            self.add(measurement);
        }
    }
}
