//! Tests for data-quality handling in the response pipeline

use tumor_response::models::DayOrderIssue;
use tumor_response::{
    DataQualityFlag, LesionRegistry, LesionResult, LesionRole, Measurement, OverallResponse,
    ResponseConfig, SubjectOutcome, TargetCategory, evaluate_subject,
};

use crate::utils::{SUBJECT, evaluate, non_target, target_series};

#[test]
fn test_missing_baseline_degrades_to_not_evaluable() {
    let measurements = target_series(SUBJECT, &[(10, 50.0), (50, 30.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    assert!(evaluation.has_flag("NO_BASELINE"));
    assert_eq!(evaluation.baseline_day, None);
    assert_eq!(evaluation.baseline_sld, None);
    assert_eq!(evaluation.timepoints.len(), 2);

    for timepoint in &evaluation.timepoints {
        assert_eq!(timepoint.response.target, TargetCategory::Ne);
        assert_eq!(timepoint.response.pct_change_baseline, None);
        assert_eq!(timepoint.overall(), OverallResponse::Ne);
        assert!(!timepoint.duration_met);
    }
    assert_eq!(evaluation.best.category, OverallResponse::Ne);
    assert_eq!(evaluation.best.day, Some(10));
    assert!(!evaluation.best.confirmed);
}

#[test]
fn test_unmeasured_baseline_targets_are_not_evaluable() {
    let measurements = vec![
        Measurement::new(SUBJECT, "T1", LesionRole::Target, -1, LesionResult::NotAssessed),
        non_target(SUBJECT, -1, LesionResult::Present),
        Measurement::target(SUBJECT, "T1", 50, 50.0),
        non_target(SUBJECT, 50, LesionResult::Absent),
        Measurement::target(SUBJECT, "T1", 90, 60.0),
        non_target(SUBJECT, 90, LesionResult::Absent),
    ];
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    assert_eq!(evaluation.baseline_day, Some(-1));
    assert_eq!(evaluation.baseline_sld, None);
    for timepoint in &evaluation.timepoints {
        assert_eq!(timepoint.response.target, TargetCategory::Ne);
        assert_eq!(timepoint.overall(), OverallResponse::Ne);
        assert!(!timepoint.confirmed);
    }
    assert_eq!(evaluation.best.category, OverallResponse::Ne);
    assert!(!evaluation.best.confirmed);
}

#[test]
fn test_orphan_measurement_is_skipped_and_flagged() {
    let mut measurements = target_series(SUBJECT, &[(-1, 50.0), (50, 45.0)]);
    measurements.push(Measurement::unresolved(
        SUBJECT,
        "X9",
        50,
        LesionResult::Diameter(100.0),
    ));

    let evaluation = evaluate(&measurements, &ResponseConfig::default());
    assert!(evaluation.has_flag("ORPHAN_MEASUREMENT"));
    assert_eq!(evaluation.timepoint(50).unwrap().response.sld, Some(45.0));
}

#[test]
fn test_registry_resolves_roles() {
    let measurements = vec![
        Measurement::unresolved(SUBJECT, "L1", -1, LesionResult::Diameter(40.0)),
        Measurement::unresolved(SUBJECT, "L2", -1, LesionResult::Present),
        Measurement::unresolved(SUBJECT, "L1", 60, LesionResult::Diameter(20.0)),
        Measurement::unresolved(SUBJECT, "L2", 60, LesionResult::Absent),
    ];
    let registry: LesionRegistry = [
        (SUBJECT.to_string(), "L1".to_string(), LesionRole::Target),
        (SUBJECT.to_string(), "L2".to_string(), LesionRole::NonTarget),
    ]
    .into_iter()
    .collect();

    let outcome = evaluate_subject(
        SUBJECT,
        &measurements,
        Some(&registry),
        &ResponseConfig::default(),
    );
    let evaluation = outcome.evaluation().unwrap();

    assert!(!evaluation.is_flagged());
    let day_60 = &evaluation.timepoint(60).unwrap().response;
    assert_eq!(day_60.target, TargetCategory::Pr);
    // target PR with non-target CR stays PR
    assert_eq!(day_60.overall, OverallResponse::Pr);
}

#[test]
fn test_duplicate_day_keeps_last_record() {
    let measurements = target_series(SUBJECT, &[(-1, 50.0), (30, 40.0), (30, 45.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    assert_eq!(evaluation.timepoints.len(), 1);
    assert_eq!(evaluation.timepoint(30).unwrap().response.sld, Some(45.0));
    assert!(evaluation.flags.contains(&DataQualityFlag::NonMonotonicDays {
        lesion_id: "T1".to_string(),
        day: 30,
        issue: DayOrderIssue::Duplicate,
    }));
}

#[test]
fn test_out_of_order_days_are_resorted() {
    let measurements = target_series(SUBJECT, &[(100, 30.0), (50, 35.0), (-1, 50.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    let out_of_order = evaluation
        .flags
        .iter()
        .filter(|flag| {
            matches!(
                flag,
                DataQualityFlag::NonMonotonicDays {
                    issue: DayOrderIssue::OutOfOrder,
                    ..
                }
            )
        })
        .count();
    assert_eq!(out_of_order, 1);

    assert_eq!(evaluation.baseline_day, Some(-1));
    let days: Vec<i32> = evaluation.timepoints.iter().map(|tp| tp.day()).collect();
    assert_eq!(days, vec![50, 100]);
    assert_eq!(evaluation.nadir_sld, Some(30.0));
}

#[test]
fn test_implausible_delta_is_flagged_but_used() {
    let measurements = target_series(SUBJECT, &[(-1, 50.0), (42, 10.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    assert!(evaluation.has_flag("IMPLAUSIBLE_DELTA"));
    assert_eq!(
        evaluation.timepoint(42).unwrap().response.target,
        TargetCategory::Pr
    );
}

#[test]
fn test_nadir_above_baseline_is_flagged_once() {
    let measurements = target_series(SUBJECT, &[(-1, 50.0), (42, 60.0), (84, 58.0)]);
    let config = ResponseConfig::builder()
        .nadir_excludes_baseline(true)
        .build()
        .unwrap();
    let evaluation = evaluate(&measurements, &config);

    let flagged = evaluation
        .flags
        .iter()
        .filter(|flag| flag.code() == "NADIR_EXCEEDS_BASELINE")
        .count();
    assert_eq!(flagged, 1);
    // not auto-corrected
    assert_eq!(evaluation.nadir_sld, Some(58.0));
}

#[test]
fn test_subject_without_usable_data() {
    let measurements = vec![Measurement::unresolved(
        SUBJECT,
        "X1",
        10,
        LesionResult::Diameter(12.0),
    )];
    let outcome = evaluate_subject(SUBJECT, &measurements, None, &ResponseConfig::default());

    match outcome {
        SubjectOutcome::NoData { subject_id, flags } => {
            assert_eq!(subject_id, SUBJECT);
            assert_eq!(flags.len(), 1);
            assert_eq!(flags[0].code(), "ORPHAN_MEASUREMENT");
        }
        SubjectOutcome::Evaluated(_) => panic!("expected no data"),
    }

    let outcome = evaluate_subject(SUBJECT, &[], None, &ResponseConfig::default());
    assert!(outcome.evaluation().is_none());
    assert_eq!(outcome.subject_id(), SUBJECT);
}
