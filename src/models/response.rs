//! Response categories and per-timepoint response records
//!
//! All best-response selection uses the single ranking CR > PR > SD > PD > NE
//! exposed by [`OverallResponse::rank`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response category of the target-lesion signal at one timepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetCategory {
    /// Complete response
    Cr,
    /// Partial response
    Pr,
    /// Stable disease
    Sd,
    /// Progressive disease
    Pd,
    /// Not evaluable
    Ne,
    /// The subject had no target lesions at baseline
    NoTargets,
}

/// Response category of the non-target signal at one timepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NonTargetCategory {
    /// All non-target lesions absent
    Cr,
    /// Persistence of one or more non-target lesions
    NonCrNonPd,
    /// Unequivocal progression
    Pd,
    /// Non-target lesions existed at baseline but none were assessed
    NotEvaluated,
    /// The subject had no non-target lesions at baseline
    NoneAtBaseline,
}

/// Indication-specific depth of response.
///
/// RECIST uses the five coarse grades; the hematologic criteria add very good
/// partial and minimal response, which map onto the shared category ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseGrade {
    /// Complete response
    Cr,
    /// Very good partial response
    Vgpr,
    /// Partial response
    Pr,
    /// Minimal response
    Mr,
    /// Stable disease / no response
    Sd,
    /// Progressive disease
    Pd,
    /// Not evaluable
    Ne,
}

impl ResponseGrade {
    /// Target category this grade contributes to the combination table
    #[must_use]
    pub const fn category(self) -> TargetCategory {
        match self {
            Self::Cr => TargetCategory::Cr,
            Self::Vgpr | Self::Pr => TargetCategory::Pr,
            Self::Mr | Self::Sd => TargetCategory::Sd,
            Self::Pd => TargetCategory::Pd,
            Self::Ne => TargetCategory::Ne,
        }
    }

    /// Short code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cr => "CR",
            Self::Vgpr => "VGPR",
            Self::Pr => "PR",
            Self::Mr => "MR",
            Self::Sd => "SD",
            Self::Pd => "PD",
            Self::Ne => "NE",
        }
    }
}

impl fmt::Display for ResponseGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Overall response at one timepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallResponse {
    /// Complete response
    Cr,
    /// Partial response
    Pr,
    /// Stable disease
    Sd,
    /// Non-CR/non-PD for subjects with non-target disease only
    NonCrNonPd,
    /// Progressive disease
    Pd,
    /// Not evaluable
    Ne,
}

impl OverallResponse {
    /// Rank in the best-response hierarchy; higher is better.
    ///
    /// Non-CR/non-PD ranks with stable disease.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Cr => 5,
            Self::Pr => 4,
            Self::Sd | Self::NonCrNonPd => 3,
            Self::Pd => 2,
            Self::Ne => 1,
        }
    }

    /// Whether the response must be confirmed by a later assessment
    #[must_use]
    pub const fn requires_confirmation(self) -> bool {
        matches!(self, Self::Cr | Self::Pr)
    }

    /// Whether the response is subject to the minimum stable-disease duration
    #[must_use]
    pub const fn is_stable(self) -> bool {
        matches!(self, Self::Sd | Self::NonCrNonPd)
    }

    /// Whether `later` confirms `self`: CR is confirmed only by CR, PR by CR or PR
    #[must_use]
    pub const fn is_confirmed_by(self, later: Self) -> bool {
        match self {
            Self::Cr => matches!(later, Self::Cr),
            Self::Pr => matches!(later, Self::Cr | Self::Pr),
            _ => false,
        }
    }

    /// Short code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cr => "CR",
            Self::Pr => "PR",
            Self::Sd => "SD",
            Self::NonCrNonPd => "NON-CR/NON-PD",
            Self::Pd => "PD",
            Self::Ne => "NE",
        }
    }
}

impl fmt::Display for OverallResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Classified response at one post-baseline timepoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimepointResponse {
    /// Subject identifier
    pub subject_id: String,
    /// Study day of the assessment
    pub day: i32,
    /// Sum of target diameters (or disease marker value) at this timepoint
    pub sld: Option<f64>,
    /// Baseline value in effect
    pub baseline_sld: Option<f64>,
    /// Nadir in effect before this timepoint was observed
    pub nadir_sld: Option<f64>,
    /// Percent change from baseline
    pub pct_change_baseline: Option<f64>,
    /// Percent change from the prior nadir
    pub pct_change_nadir: Option<f64>,
    /// Target-lesion category
    pub target: TargetCategory,
    /// Indication-specific grade behind the target category
    pub grade: Option<ResponseGrade>,
    /// Non-target category
    pub non_target: NonTargetCategory,
    /// Whether a new lesion was reported at this timepoint
    pub new_lesion: bool,
    /// Combined overall response
    pub overall: OverallResponse,
}

/// Timepoint response with its confirmation status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedResponse {
    /// The classified timepoint
    pub response: TimepointResponse,
    /// CR/PR confirmed by a later assessment inside the window
    pub confirmed: bool,
    /// Day of the confirming assessment
    pub confirmed_by_day: Option<i32>,
    /// Elapsed days from baseline meet the stable-disease minimum
    pub duration_met: bool,
}

impl ConfirmedResponse {
    /// Study day of the underlying timepoint
    #[must_use]
    pub fn day(&self) -> i32 {
        self.response.day
    }

    /// Overall category of the underlying timepoint
    #[must_use]
    pub fn overall(&self) -> OverallResponse {
        self.response.overall
    }
}

/// Best overall response for one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestOverallResponse {
    /// Subject identifier
    pub subject_id: String,
    /// Best eligible category, one of CR, PR, SD, PD or NE; non-CR/non-PD is
    /// reported as SD
    pub category: OverallResponse,
    /// Day the category was first achieved in confirmed form
    pub day: Option<i32>,
    /// The category passed a confirmation or minimum-duration rule: true for a
    /// confirmed CR/PR and for SD, false for PD and NE
    pub confirmed: bool,
}

impl BestOverallResponse {
    /// Best response for a subject without any eligible assessment
    #[must_use]
    pub fn not_evaluable(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            category: OverallResponse::Ne,
            day: None,
            confirmed: false,
        }
    }

    /// Whether the best response is an objective response (CR or PR)
    #[must_use]
    pub fn is_objective_response(&self) -> bool {
        matches!(self.category, OverallResponse::Cr | OverallResponse::Pr)
    }
}

impl fmt::Display for BestOverallResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{}: {} (day {day})", self.subject_id, self.category),
            None => write!(f, "{}: {}", self.subject_id, self.category),
        }
    }
}
