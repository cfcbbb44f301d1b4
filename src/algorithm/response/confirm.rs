//! Confirmation of CR/PR and minimum duration of stable disease
//!
//! A CR or PR is confirmed by the first later assessment of equal or better
//! category whose gap from the initial assessment lies inside the
//! confirmation window, bounds included. Stable disease needs no second
//! assessment; it only has to be far enough from baseline.

use crate::config::ResponseConfig;
use crate::models::{ConfirmedResponse, OverallResponse, TimepointResponse};

/// Attach confirmation status to a subject's timepoint responses.
///
/// `responses` must be ascending by day. `duration_met` is computed for every
/// timepoint as `day - baseline_day >= sd_min_duration`, and is `false`
/// without a baseline.
#[must_use]
pub fn confirm_responses(
    responses: Vec<TimepointResponse>,
    baseline_day: Option<i32>,
    config: &ResponseConfig,
) -> Vec<ConfirmedResponse> {
    debug_assert!(
        responses.windows(2).all(|pair| pair[0].day < pair[1].day),
        "responses must be strictly ascending by day"
    );

    let confirmations: Vec<Option<i32>> = (0..responses.len())
        .map(|index| find_confirmation(&responses, index, config))
        .collect();

    responses
        .into_iter()
        .zip(confirmations)
        .map(|(response, confirmed_by_day)| {
            let duration_met =
                baseline_day.is_some_and(|day| response.day - day >= config.sd_min_duration);
            ConfirmedResponse {
                response,
                confirmed: confirmed_by_day.is_some(),
                confirmed_by_day,
                duration_met,
            }
        })
        .collect()
}

/// Day of the assessment confirming `responses[index]`, if any
#[must_use]
pub fn find_confirmation(
    responses: &[TimepointResponse],
    index: usize,
    config: &ResponseConfig,
) -> Option<i32> {
    let initial = responses.get(index)?;
    if !initial.overall.requires_confirmation() {
        return None;
    }

    let window = config.confirm_window;
    for later in &responses[index + 1..] {
        let gap = later.day - initial.day;
        if gap > window.max_days {
            break;
        }
        if window.contains(gap) && initial.overall.is_confirmed_by(later.overall) {
            return Some(later.day);
        }
        if config.interrupted_by_progression && later.overall == OverallResponse::Pd {
            return None;
        }
    }
    None
}
