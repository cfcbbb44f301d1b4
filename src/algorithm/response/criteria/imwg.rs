//! IMWG response criteria for multiple myeloma
//!
//! The graded value is the serum M-protein (g/dL). Progression is checked
//! against the nadir before any reduction from baseline is considered.

use crate::algorithm::response::criteria::{ResponseCriteria, TOLERANCE, at_least, at_most};
use crate::config::ResponseConfig;
use crate::models::ResponseGrade;

/// IMWG criteria
#[derive(Debug, Clone, Copy, Default)]
pub struct ImwgCriteria;

impl ResponseCriteria for ImwgCriteria {
    fn name(&self) -> &'static str {
        "IMWG"
    }

    fn grade(
        &self,
        value: f64,
        baseline: f64,
        nadir: Option<f64>,
        config: &ResponseConfig,
    ) -> ResponseGrade {
        let thresholds = &config.imwg;

        if value.abs() <= TOLERANCE {
            return ResponseGrade::Cr;
        }
        if let Some(nadir) = nadir {
            let absolute = at_least(value - nadir, thresholds.pd_absolute);
            let relative = nadir <= 0.0 || at_least(value / nadir, thresholds.pd_ratio);
            if absolute && relative {
                return ResponseGrade::Pd;
            }
        }

        let ratio = value / baseline;
        if at_most(ratio, thresholds.vgpr_ratio) {
            ResponseGrade::Vgpr
        } else if at_most(ratio, thresholds.pr_ratio) {
            ResponseGrade::Pr
        } else if at_most(ratio, thresholds.mr_ratio) {
            ResponseGrade::Mr
        } else {
            ResponseGrade::Sd
        }
    }

    fn is_evaluable_baseline(&self, baseline: f64, _config: &ResponseConfig) -> bool {
        baseline > 0.0
    }
}
