//! Overall timepoint response (RECIST 1.1 Table 4)
//!
//! Arms are matched top to bottom; their order is the precedence, so a new
//! lesion and any progression dominate the lesion-level categories below them.

use crate::models::{NonTargetCategory, OverallResponse, TargetCategory};

/// Combine the target, non-target and new-lesion signals at one timepoint
#[must_use]
pub fn combine(
    target: TargetCategory,
    non_target: NonTargetCategory,
    new_lesion: bool,
) -> OverallResponse {
    use NonTargetCategory as Nt;
    use TargetCategory as T;

    match (target, non_target, new_lesion) {
        (_, _, true) => OverallResponse::Pd,
        (T::Cr, Nt::Cr | Nt::NoneAtBaseline, false) => OverallResponse::Cr,
        (T::Cr, Nt::NonCrNonPd, false) => OverallResponse::Pr,
        (T::Pr, nt, false) if nt != Nt::Pd => OverallResponse::Pr,
        (T::Sd, nt, false) if nt != Nt::Pd => OverallResponse::Sd,
        (T::Pd, _, false) | (_, Nt::Pd, false) => OverallResponse::Pd,
        (T::NoTargets, Nt::Cr, false) => OverallResponse::Cr,
        (T::NoTargets, Nt::NonCrNonPd, false) => OverallResponse::NonCrNonPd,
        _ => OverallResponse::Ne,
    }
}
