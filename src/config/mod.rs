//! Configuration for response assessment.
//!
//! Every component receives the same explicit [`ResponseConfig`] value; there
//! is no global state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ResponseError, Result};

/// Response criteria set used by the timepoint classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Indication {
    /// RECIST 1.1 for solid tumors
    #[default]
    #[serde(rename = "RECIST11")]
    Recist11,
    /// IMWG response criteria for multiple myeloma
    #[serde(rename = "IMWG2025")]
    Imwg2025,
    /// Palladini 2012 hematologic response criteria for AL amyloidosis
    #[serde(rename = "PALLADINI2012")]
    Palladini2012,
}

impl fmt::Display for Indication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recist11 => write!(f, "RECIST 1.1"),
            Self::Imwg2025 => write!(f, "IMWG 2025"),
            Self::Palladini2012 => write!(f, "Palladini 2012"),
        }
    }
}

/// Rule selecting the baseline assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaselinePolicy {
    /// Last assessment before day 1, or one carrying a screening marker
    #[default]
    Pretreat,
    /// Chronologically first assessment regardless of day
    First,
}

/// Inclusive day range in which a CR/PR must be repeated to be confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationWindow {
    /// Minimum gap in days
    pub min_days: i32,
    /// Maximum gap in days
    pub max_days: i32,
}

impl Default for ConfirmationWindow {
    fn default() -> Self {
        Self {
            min_days: 28,
            max_days: 84,
        }
    }
}

impl ConfirmationWindow {
    /// Create a window
    #[must_use]
    pub const fn new(min_days: i32, max_days: i32) -> Self {
        Self { min_days, max_days }
    }

    /// Whether a gap in days lies inside the window, bounds included
    #[must_use]
    pub const fn contains(&self, gap: i32) -> bool {
        gap >= self.min_days && gap <= self.max_days
    }
}

/// RECIST 1.1 target-lesion thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecistThresholds {
    /// Maximum ratio of current to baseline SLD for partial response
    pub pr_ratio: f64,
    /// Minimum ratio of current SLD to nadir for progression
    pub pd_ratio: f64,
    /// Minimum absolute increase over nadir for progression (mm)
    pub pd_absolute_mm: f64,
    /// Nadir below which the Enaworu absolute-only test applies (mm)
    pub enaworu_nadir_mm: f64,
}

impl Default for RecistThresholds {
    fn default() -> Self {
        Self {
            pr_ratio: 0.70,
            pd_ratio: 1.20,
            pd_absolute_mm: 5.0,
            enaworu_nadir_mm: 25.0,
        }
    }
}

/// IMWG thresholds on serum M-protein (g/dL)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImwgThresholds {
    /// Maximum ratio to baseline for very good partial response
    pub vgpr_ratio: f64,
    /// Maximum ratio to baseline for partial response
    pub pr_ratio: f64,
    /// Maximum ratio to baseline for minimal response
    pub mr_ratio: f64,
    /// Minimum ratio to nadir for progression
    pub pd_ratio: f64,
    /// Minimum absolute increase over nadir for progression (g/dL)
    pub pd_absolute: f64,
}

impl Default for ImwgThresholds {
    fn default() -> Self {
        Self {
            vgpr_ratio: 0.10,
            pr_ratio: 0.50,
            mr_ratio: 0.75,
            pd_ratio: 1.25,
            pd_absolute: 0.5,
        }
    }
}

/// Palladini thresholds on the difference between involved and uninvolved
/// free light chains (dFLC, mg/L)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalladiniThresholds {
    /// Minimum baseline dFLC for the subject to be evaluable
    pub min_evaluable_baseline: f64,
    /// dFLC below which the response is a very good partial response
    pub vgpr_below: f64,
    /// Maximum ratio to baseline for partial response
    pub pr_ratio: f64,
    /// Minimum ratio to nadir for progression
    pub pd_ratio: f64,
    /// dFLC that must be exceeded for progression
    pub pd_floor: f64,
}

impl Default for PalladiniThresholds {
    fn default() -> Self {
        Self {
            min_evaluable_baseline: 50.0,
            vgpr_below: 40.0,
            pr_ratio: 0.50,
            pd_ratio: 1.50,
            pd_floor: 100.0,
        }
    }
}

/// Configuration for response assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Criteria set for the timepoint classifier
    pub indication: Indication,
    /// Rule selecting the baseline assessment
    pub baseline_policy: BaselinePolicy,
    /// Whether the baseline value is excluded from the nadir
    pub nadir_excludes_baseline: bool,
    /// Apply the absolute-only progression test below the Enaworu nadir
    pub enaworu_simplification: bool,
    /// Window for confirming CR/PR
    pub confirm_window: ConfirmationWindow,
    /// Minimum days from baseline for stable disease to count
    pub sd_min_duration: i32,
    /// Relative change between consecutive values above which a warning is raised
    pub plausibility_ratio: f64,
    /// An intervening PD cancels a pending CR/PR confirmation
    pub interrupted_by_progression: bool,
    /// Unconfirmed CR/PR meeting the stable-disease duration count as SD
    pub unconfirmed_as_stable: bool,
    /// Show a progress bar during batch evaluation
    pub show_progress: bool,
    /// RECIST 1.1 thresholds
    pub recist: RecistThresholds,
    /// IMWG thresholds
    pub imwg: ImwgThresholds,
    /// Palladini thresholds
    pub palladini: PalladiniThresholds,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            indication: Indication::Recist11,
            baseline_policy: BaselinePolicy::Pretreat,
            nadir_excludes_baseline: false,
            enaworu_simplification: false,
            confirm_window: ConfirmationWindow::default(),
            sd_min_duration: 42,
            plausibility_ratio: 0.5,
            interrupted_by_progression: false,
            unconfirmed_as_stable: false,
            show_progress: false,
            recist: RecistThresholds::default(),
            imwg: ImwgThresholds::default(),
            palladini: PalladiniThresholds::default(),
        }
    }
}

impl ResponseConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a configuration
    #[must_use]
    pub fn builder() -> ResponseConfigBuilder {
        ResponseConfigBuilder::new()
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is internally consistent
    pub fn validate(&self) -> Result<()> {
        let window = self.confirm_window;
        if window.min_days < 0 || window.max_days < window.min_days {
            return Err(ResponseError::InvalidWindow {
                min_days: window.min_days,
                max_days: window.max_days,
            });
        }
        if self.sd_min_duration < 0 {
            return Err(ResponseError::config(format!(
                "sd_min_duration must not be negative, got {}",
                self.sd_min_duration
            )));
        }
        check_positive("config", "plausibility_ratio", self.plausibility_ratio)?;

        let recist = &self.recist;
        check_positive("RECIST 1.1", "pr_ratio", recist.pr_ratio)?;
        check_positive("RECIST 1.1", "pd_ratio", recist.pd_ratio)?;
        check_positive("RECIST 1.1", "pd_absolute_mm", recist.pd_absolute_mm)?;
        check_positive("RECIST 1.1", "enaworu_nadir_mm", recist.enaworu_nadir_mm)?;

        let imwg = &self.imwg;
        check_positive("IMWG", "vgpr_ratio", imwg.vgpr_ratio)?;
        check_positive("IMWG", "pr_ratio", imwg.pr_ratio)?;
        check_positive("IMWG", "mr_ratio", imwg.mr_ratio)?;
        check_positive("IMWG", "pd_ratio", imwg.pd_ratio)?;
        check_positive("IMWG", "pd_absolute", imwg.pd_absolute)?;
        if !(imwg.vgpr_ratio <= imwg.pr_ratio && imwg.pr_ratio <= imwg.mr_ratio) {
            return Err(ResponseError::config(
                "IMWG ratios must satisfy vgpr_ratio <= pr_ratio <= mr_ratio",
            ));
        }

        let palladini = &self.palladini;
        check_positive("Palladini", "vgpr_below", palladini.vgpr_below)?;
        check_positive("Palladini", "pr_ratio", palladini.pr_ratio)?;
        check_positive("Palladini", "pd_ratio", palladini.pd_ratio)?;
        check_positive("Palladini", "pd_floor", palladini.pd_floor)?;
        if palladini.min_evaluable_baseline < 0.0 {
            return Err(ResponseError::InvalidThreshold {
                criteria: "Palladini",
                name: "min_evaluable_baseline",
                value: palladini.min_evaluable_baseline,
            });
        }

        Ok(())
    }
}

fn check_positive(criteria: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ResponseError::InvalidThreshold {
            criteria,
            name,
            value,
        })
    }
}

impl fmt::Display for ResponseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Response Configuration:")?;
        writeln!(f, "  Indication: {}", self.indication)?;
        writeln!(f, "  Baseline Policy: {:?}", self.baseline_policy)?;
        writeln!(f, "  Nadir Excludes Baseline: {}", self.nadir_excludes_baseline)?;
        writeln!(f, "  Enaworu Simplification: {}", self.enaworu_simplification)?;
        writeln!(
            f,
            "  Confirmation Window: [{}, {}] days",
            self.confirm_window.min_days, self.confirm_window.max_days
        )?;
        writeln!(f, "  SD Minimum Duration: {} days", self.sd_min_duration)?;
        writeln!(f, "  Plausibility Ratio: {}", self.plausibility_ratio)?;
        if self.interrupted_by_progression {
            writeln!(f, "  Confirmation Interrupted By PD: true")?;
        }
        if self.unconfirmed_as_stable {
            writeln!(f, "  Unconfirmed CR/PR As SD: true")?;
        }
        Ok(())
    }
}

/// Builder for constructing a response configuration
#[derive(Debug, Clone, Default)]
pub struct ResponseConfigBuilder {
    config: ResponseConfig,
}

impl ResponseConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ResponseConfig::default(),
        }
    }

    /// Set the indication
    #[must_use]
    pub const fn indication(mut self, indication: Indication) -> Self {
        self.config.indication = indication;
        self
    }

    /// Set the baseline policy
    #[must_use]
    pub const fn baseline_policy(mut self, policy: BaselinePolicy) -> Self {
        self.config.baseline_policy = policy;
        self
    }

    /// Set whether the baseline is excluded from the nadir
    #[must_use]
    pub const fn nadir_excludes_baseline(mut self, excluded: bool) -> Self {
        self.config.nadir_excludes_baseline = excluded;
        self
    }

    /// Set whether the Enaworu simplification is applied
    #[must_use]
    pub const fn enaworu_simplification(mut self, enabled: bool) -> Self {
        self.config.enaworu_simplification = enabled;
        self
    }

    /// Set the confirmation window in days
    #[must_use]
    pub const fn confirm_window(mut self, min_days: i32, max_days: i32) -> Self {
        self.config.confirm_window = ConfirmationWindow::new(min_days, max_days);
        self
    }

    /// Set the minimum stable-disease duration in days
    #[must_use]
    pub const fn sd_min_duration(mut self, days: i32) -> Self {
        self.config.sd_min_duration = days;
        self
    }

    /// Set the plausibility ratio for single-visit changes
    #[must_use]
    pub const fn plausibility_ratio(mut self, ratio: f64) -> Self {
        self.config.plausibility_ratio = ratio;
        self
    }

    /// Set whether an intervening PD cancels confirmation
    #[must_use]
    pub const fn interrupted_by_progression(mut self, enabled: bool) -> Self {
        self.config.interrupted_by_progression = enabled;
        self
    }

    /// Set whether unconfirmed CR/PR may count as SD
    #[must_use]
    pub const fn unconfirmed_as_stable(mut self, enabled: bool) -> Self {
        self.config.unconfirmed_as_stable = enabled;
        self
    }

    /// Set whether batch evaluation shows a progress bar
    #[must_use]
    pub const fn show_progress(mut self, enabled: bool) -> Self {
        self.config.show_progress = enabled;
        self
    }

    /// Set the RECIST thresholds
    #[must_use]
    pub fn recist(mut self, thresholds: RecistThresholds) -> Self {
        self.config.recist = thresholds;
        self
    }

    /// Set the IMWG thresholds
    #[must_use]
    pub fn imwg(mut self, thresholds: ImwgThresholds) -> Self {
        self.config.imwg = thresholds;
        self
    }

    /// Set the Palladini thresholds
    #[must_use]
    pub fn palladini(mut self, thresholds: PalladiniThresholds) -> Self {
        self.config.palladini = thresholds;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ResponseConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
