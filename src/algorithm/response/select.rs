//! Best overall response selection

use std::cmp::Reverse;

use crate::config::ResponseConfig;
use crate::models::{BestOverallResponse, ConfirmedResponse, OverallResponse};

/// Category a timepoint contributes to best-response selection, if eligible.
///
/// CR/PR need confirmation, SD and non-CR/non-PD need the minimum duration,
/// PD and NE are always eligible. Non-CR/non-PD contributes as SD. With
/// `unconfirmed_as_stable`, an unconfirmed CR/PR that meets the duration
/// counts as SD.
#[must_use]
pub fn eligible_category(
    response: &ConfirmedResponse,
    config: &ResponseConfig,
) -> Option<OverallResponse> {
    let overall = response.overall();
    match overall {
        OverallResponse::Cr | OverallResponse::Pr if response.confirmed => Some(overall),
        OverallResponse::Cr | OverallResponse::Pr
            if config.unconfirmed_as_stable && response.duration_met =>
        {
            Some(OverallResponse::Sd)
        }
        OverallResponse::Cr | OverallResponse::Pr => None,
        OverallResponse::Sd | OverallResponse::NonCrNonPd => {
            response.duration_met.then_some(OverallResponse::Sd)
        }
        OverallResponse::Pd | OverallResponse::Ne => Some(overall),
    }
}

/// Pick the best eligible response, ties broken by the earliest day
#[must_use]
pub fn select_best(
    subject_id: &str,
    responses: &[ConfirmedResponse],
    config: &ResponseConfig,
) -> BestOverallResponse {
    responses
        .iter()
        .filter_map(|response| {
            eligible_category(response, config).map(|category| (category, response.day()))
        })
        .min_by_key(|&(category, day)| (Reverse(category.rank()), day))
        .map_or_else(
            || BestOverallResponse::not_evaluable(subject_id),
            |(category, day)| BestOverallResponse {
                subject_id: subject_id.to_string(),
                category,
                day: Some(day),
                confirmed: !matches!(category, OverallResponse::Pd | OverallResponse::Ne),
            },
        )
}
