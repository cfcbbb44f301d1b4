//! Plausibility checks over a tracked series

use crate::algorithm::response::tracker::TrackedSeries;
use crate::models::DataQualityFlag;

/// Flag every evaluable timepoint whose value changed by more than `ratio`
/// relative to the previous evaluable value (baseline included).
///
/// Classification is unaffected; the reported value is still used.
#[must_use]
pub fn implausible_deltas(series: &TrackedSeries, ratio: f64) -> Vec<DataQualityFlag> {
    let mut flags = Vec::new();
    let mut previous = series.baseline.as_ref().and_then(|baseline| baseline.sld);

    for timepoint in &series.timepoints {
        let Some(sld) = timepoint.aggregate.sld else {
            continue;
        };
        if let Some(previous_sld) = previous.filter(|value| *value > 0.0) {
            let change = (sld - previous_sld).abs() / previous_sld;
            if change > ratio {
                flags.push(DataQualityFlag::ImplausibleDelta {
                    day: timepoint.aggregate.day,
                    previous_sld,
                    sld,
                    ratio: change,
                });
            }
        }
        previous = Some(sld);
    }

    flags
}
