//! RECIST 1.1 target-lesion rules
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. SLD of 0 is a complete response.
//! 2. SLD at or below 70% of baseline is a partial response.
//! 3. Progression against the nadir (see [`is_progression`]).
//! 4. Otherwise stable disease.

use crate::algorithm::response::criteria::{ResponseCriteria, TOLERANCE, at_least, at_most};
use crate::config::{RecistThresholds, ResponseConfig};
use crate::models::ResponseGrade;

/// RECIST 1.1 criteria for solid tumors
#[derive(Debug, Clone, Copy, Default)]
pub struct Recist11Criteria;

impl ResponseCriteria for Recist11Criteria {
    fn name(&self) -> &'static str {
        "RECIST 1.1"
    }

    fn grade(
        &self,
        value: f64,
        baseline: f64,
        nadir: Option<f64>,
        config: &ResponseConfig,
    ) -> ResponseGrade {
        let thresholds = &config.recist;

        if value.abs() <= TOLERANCE {
            return ResponseGrade::Cr;
        }
        if baseline > 0.0 && at_most(value / baseline, thresholds.pr_ratio) {
            return ResponseGrade::Pr;
        }
        if let Some(nadir) = nadir {
            if is_progression(value, nadir, thresholds, config.enaworu_simplification) {
                return ResponseGrade::Pd;
            }
        }
        ResponseGrade::Sd
    }
}

/// Progression of the SLD relative to the nadir.
///
/// Normally both the relative increase (≥ 20%) and the absolute increase
/// (≥ 5 mm) are required. With the Enaworu simplification, a nadir below
/// 25 mm uses the absolute test alone.
#[must_use]
pub fn is_progression(
    sld: f64,
    nadir: f64,
    thresholds: &RecistThresholds,
    enaworu_simplification: bool,
) -> bool {
    let absolute = at_least(sld - nadir, thresholds.pd_absolute_mm);
    if enaworu_simplification && nadir < thresholds.enaworu_nadir_mm {
        return absolute;
    }
    let relative = if nadir > 0.0 {
        at_least(sld / nadir, thresholds.pd_ratio)
    } else {
        sld > 0.0
    };
    absolute && relative
}
