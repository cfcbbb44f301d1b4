//! Palladini 2012 hematologic response criteria for AL amyloidosis
//!
//! The graded value is the dFLC (involved minus uninvolved free light chain,
//! mg/L). Subjects whose baseline dFLC is below the evaluability floor cannot
//! be assessed.

use crate::algorithm::response::criteria::{ResponseCriteria, TOLERANCE, at_least, at_most};
use crate::config::ResponseConfig;
use crate::models::ResponseGrade;

/// Palladini 2012 criteria
#[derive(Debug, Clone, Copy, Default)]
pub struct PalladiniCriteria;

impl ResponseCriteria for PalladiniCriteria {
    fn name(&self) -> &'static str {
        "Palladini 2012"
    }

    fn grade(
        &self,
        value: f64,
        baseline: f64,
        nadir: Option<f64>,
        config: &ResponseConfig,
    ) -> ResponseGrade {
        let thresholds = &config.palladini;

        if value.abs() <= TOLERANCE {
            return ResponseGrade::Cr;
        }
        if let Some(nadir) = nadir {
            let relative = nadir <= 0.0 || at_least(value / nadir, thresholds.pd_ratio);
            if relative && value > thresholds.pd_floor {
                return ResponseGrade::Pd;
            }
        }
        if value < thresholds.vgpr_below {
            return ResponseGrade::Vgpr;
        }
        if baseline > 0.0 && at_most(value / baseline, thresholds.pr_ratio) {
            return ResponseGrade::Pr;
        }
        ResponseGrade::Sd
    }

    fn is_evaluable_baseline(&self, baseline: f64, config: &ResponseConfig) -> bool {
        baseline >= config.palladini.min_evaluable_baseline
    }
}
