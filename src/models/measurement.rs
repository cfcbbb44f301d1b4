//! Lesion measurement model
//!
//! A [`Measurement`] is one reported lesion result at one assessment day. It is
//! created by the external reader of the tumor-results domain and is never
//! mutated by the engine.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::dates::study_day;

/// Role a lesion plays in the assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LesionRole {
    /// Measurable lesion selected at baseline; contributes to the SLD
    Target,
    /// Lesion followed qualitatively
    NonTarget,
    /// Lesion first seen after baseline
    New,
}

impl LesionRole {
    /// Parse a role from the codes used in tumor-identification records
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "TARGET" | "T" => Some(Self::Target),
            "NON_TARGET" | "NONTARGET" | "NT" => Some(Self::NonTarget),
            "NEW" | "N" => Some(Self::New),
            _ => None,
        }
    }
}

impl fmt::Display for LesionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => write!(f, "TARGET"),
            Self::NonTarget => write!(f, "NON-TARGET"),
            Self::New => write!(f, "NEW"),
        }
    }
}

/// Reported result for a lesion at one assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LesionResult {
    /// Numeric longest diameter (mm for RECIST, g/dL or mg/L for the
    /// hematologic criteria)
    Diameter(f64),
    /// Lesion no longer present
    Absent,
    /// Lesion present without unequivocal progression
    Present,
    /// Unequivocal progression of the lesion
    Progression,
    /// Lesion not assessed at this visit
    NotAssessed,
}

impl LesionResult {
    /// Numeric value contributing to a sum of diameters.
    ///
    /// An absent target lesion contributes 0. Negative or non-finite values
    /// are treated as not assessed.
    #[must_use]
    pub fn numeric(self) -> Option<f64> {
        match self {
            Self::Diameter(value) if value.is_finite() && value >= 0.0 => Some(value),
            Self::Absent => Some(0.0),
            _ => None,
        }
    }
}

/// One reported lesion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Subject identifier
    pub subject_id: String,
    /// Lesion identifier, unique within a subject
    pub lesion_id: String,
    /// Lesion role, if reported inline with the result
    pub role: Option<LesionRole>,
    /// Study day of the assessment
    pub day: i32,
    /// Reported result
    pub result: LesionResult,
    /// Explicit screening/baseline visit marker
    #[serde(default)]
    pub screening: bool,
}

impl Measurement {
    /// Create a measurement with an explicit role
    #[must_use]
    pub fn new(
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        role: LesionRole,
        day: i32,
        result: LesionResult,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            lesion_id: lesion_id.into(),
            role: Some(role),
            day,
            result,
            screening: false,
        }
    }

    /// Create a target lesion diameter measurement
    #[must_use]
    pub fn target(
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        day: i32,
        diameter: f64,
    ) -> Self {
        Self::new(
            subject_id,
            lesion_id,
            LesionRole::Target,
            day,
            LesionResult::Diameter(diameter),
        )
    }

    /// Create a non-target lesion result
    #[must_use]
    pub fn non_target(
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        day: i32,
        result: LesionResult,
    ) -> Self {
        Self::new(subject_id, lesion_id, LesionRole::NonTarget, day, result)
    }

    /// Create a new-lesion record
    #[must_use]
    pub fn new_lesion(
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        day: i32,
    ) -> Self {
        Self::new(
            subject_id,
            lesion_id,
            LesionRole::New,
            day,
            LesionResult::Present,
        )
    }

    /// Create a measurement whose role must be resolved through a
    /// [`LesionRegistry`]
    #[must_use]
    pub fn unresolved(
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        day: i32,
        result: LesionResult,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            lesion_id: lesion_id.into(),
            role: None,
            day,
            result,
            screening: false,
        }
    }

    /// Create a measurement from a calendar date relative to a reference date
    #[must_use]
    pub fn on_date(
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        role: LesionRole,
        reference: NaiveDate,
        date: NaiveDate,
        result: LesionResult,
    ) -> Self {
        Self::new(subject_id, lesion_id, role, study_day(reference, date), result)
    }

    /// Mark this measurement as taken at the screening visit
    #[must_use]
    pub fn screening(mut self) -> Self {
        self.screening = true;
        self
    }
}

/// Lesion identity records mapping (subject, lesion) to a role
#[derive(Debug, Clone, Default)]
pub struct LesionRegistry {
    roles: FxHashMap<(String, String), LesionRole>,
}

impl LesionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the role of a lesion, replacing any previous entry
    pub fn insert(
        &mut self,
        subject_id: impl Into<String>,
        lesion_id: impl Into<String>,
        role: LesionRole,
    ) {
        self.roles
            .insert((subject_id.into(), lesion_id.into()), role);
    }

    /// Look up the role of a lesion
    #[must_use]
    pub fn role_of(&self, subject_id: &str, lesion_id: &str) -> Option<LesionRole> {
        self.roles
            .get(&(subject_id.to_string(), lesion_id.to_string()))
            .copied()
    }

    /// Resolve the role of a measurement: the inline role wins, otherwise
    /// the registry entry
    #[must_use]
    pub fn resolve(&self, measurement: &Measurement) -> Option<LesionRole> {
        measurement
            .role
            .or_else(|| self.role_of(&measurement.subject_id, &measurement.lesion_id))
    }

    /// Number of registered lesions
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl FromIterator<(String, String, LesionRole)> for LesionRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String, LesionRole)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (subject_id, lesion_id, role) in iter {
            registry.insert(subject_id, lesion_id, role);
        }
        registry
    }
}
