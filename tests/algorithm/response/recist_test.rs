//! End-to-end RECIST 1.1 evaluation tests

use tumor_response::{
    BaselinePolicy, LesionResult, LesionRole, Measurement, NonTargetCategory, OverallResponse,
    RecistThresholds, ResponseConfig, TargetCategory,
};

use crate::utils::{SUBJECT, assert_pct, evaluate, non_target, target_series};

#[test]
fn test_partial_response_with_nadir_update() {
    let mut measurements = vec![Measurement::target(SUBJECT, "T1", 1, 100.0).screening()];
    measurements.extend(target_series(SUBJECT, &[(57, 70.0), (113, 65.0)]));

    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    assert_eq!(evaluation.baseline_day, Some(1));
    assert_eq!(evaluation.baseline_sld, Some(100.0));
    assert_eq!(evaluation.timepoints.len(), 2);

    let day_57 = &evaluation.timepoint(57).unwrap().response;
    assert_eq!(day_57.target, TargetCategory::Pr);
    assert_eq!(day_57.non_target, NonTargetCategory::NoneAtBaseline);
    assert_eq!(day_57.overall, OverallResponse::Pr);
    assert_pct(day_57.pct_change_baseline, -30.0);
    assert_eq!(day_57.nadir_sld, Some(100.0));

    let day_113 = &evaluation.timepoint(113).unwrap().response;
    assert_eq!(day_113.overall, OverallResponse::Pr);
    assert_eq!(day_113.nadir_sld, Some(70.0));
    assert_pct(day_113.pct_change_nadir, -7.142_857_142_857_143);

    assert_eq!(evaluation.nadir_sld, Some(65.0));
    assert_eq!(evaluation.nadir_day, Some(113));

    // day 113 lies 56 days after day 57
    let confirmed = evaluation.timepoint(57).unwrap();
    assert!(confirmed.confirmed);
    assert_eq!(confirmed.confirmed_by_day, Some(113));

    assert_eq!(evaluation.best.category, OverallResponse::Pr);
    assert_eq!(evaluation.best.day, Some(57));
    assert!(evaluation.best.is_objective_response());
    assert!(!evaluation.is_flagged());
}

#[test]
fn test_complete_response_only_at_exactly_zero() {
    let measurements = target_series(SUBJECT, &[(-5, 50.0), (30, 1.0), (60, 0.0), (100, 0.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    let day_30 = &evaluation.timepoint(30).unwrap().response;
    assert_eq!(day_30.target, TargetCategory::Pr);
    assert_pct(day_30.pct_change_baseline, -98.0);

    let day_60 = &evaluation.timepoint(60).unwrap().response;
    assert_eq!(day_60.target, TargetCategory::Cr);
    assert_eq!(day_60.overall, OverallResponse::Cr);

    assert_eq!(evaluation.best.category, OverallResponse::Cr);
    assert_eq!(evaluation.best.day, Some(60));
}

#[test]
fn test_absent_target_lesion_counts_as_zero() {
    let measurements = vec![
        Measurement::target(SUBJECT, "T1", -1, 30.0),
        Measurement::target(SUBJECT, "T2", -1, 20.0),
        Measurement::new(SUBJECT, "T1", LesionRole::Target, 50, LesionResult::Absent),
        Measurement::target(SUBJECT, "T2", 50, 10.0),
    ];
    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    let day_50 = &evaluation.timepoint(50).unwrap().response;
    assert_eq!(day_50.sld, Some(10.0));
    assert_eq!(day_50.target, TargetCategory::Pr);
}

#[test]
fn test_new_lesion_overrides_response() {
    let mut measurements = target_series(SUBJECT, &[(-1, 100.0), (42, 60.0), (84, 55.0)]);
    measurements.push(Measurement::new_lesion(SUBJECT, "N1", 84));

    let evaluation = evaluate(&measurements, &ResponseConfig::default());

    let day_84 = &evaluation.timepoint(84).unwrap().response;
    assert_eq!(day_84.target, TargetCategory::Pr);
    assert!(day_84.new_lesion);
    assert_eq!(day_84.overall, OverallResponse::Pd);

    // the PR at day 42 is never confirmed
    assert!(!evaluation.timepoint(42).unwrap().confirmed);
    assert_eq!(evaluation.best.category, OverallResponse::Pd);
    assert_eq!(evaluation.best.day, Some(84));
}

#[test]
fn test_new_lesion_before_baseline_is_ignored() {
    let mut measurements = target_series(SUBJECT, &[(-1, 100.0), (42, 95.0)]);
    measurements.push(Measurement::new_lesion(SUBJECT, "N1", -1));

    let evaluation = evaluate(&measurements, &ResponseConfig::default());
    let day_42 = &evaluation.timepoint(42).unwrap().response;
    assert!(!day_42.new_lesion);
    assert_eq!(day_42.overall, OverallResponse::Sd);
}

#[test]
fn test_unconfirmed_response_downgrades_when_configured() {
    let mut measurements = target_series(SUBJECT, &[(-1, 100.0), (42, 60.0), (84, 55.0)]);
    measurements.push(Measurement::new_lesion(SUBJECT, "N1", 84));

    let config = ResponseConfig::builder()
        .unconfirmed_as_stable(true)
        .build()
        .unwrap();
    let evaluation = evaluate(&measurements, &config);

    assert_eq!(evaluation.best.category, OverallResponse::Sd);
    assert_eq!(evaluation.best.day, Some(42));
}

#[test]
fn test_non_target_progression_dominates_target_response() {
    let mut measurements = target_series(SUBJECT, &[(-1, 100.0), (56, 60.0)]);
    measurements.push(non_target(SUBJECT, -1, LesionResult::Present));
    measurements.push(non_target(SUBJECT, 56, LesionResult::Progression));

    let evaluation = evaluate(&measurements, &ResponseConfig::default());
    let day_56 = &evaluation.timepoint(56).unwrap().response;
    assert_eq!(day_56.target, TargetCategory::Pr);
    assert_eq!(day_56.non_target, NonTargetCategory::Pd);
    assert_eq!(day_56.overall, OverallResponse::Pd);
}

#[test]
fn test_non_target_only_disease() {
    let measurements = vec![
        non_target(SUBJECT, -1, LesionResult::Present),
        non_target(SUBJECT, 50, LesionResult::Present),
        non_target(SUBJECT, 100, LesionResult::Absent),
    ];

    let evaluation = evaluate(&measurements, &ResponseConfig::default());
    let day_50 = &evaluation.timepoint(50).unwrap().response;
    assert_eq!(day_50.target, TargetCategory::NoTargets);
    assert_eq!(day_50.overall, OverallResponse::NonCrNonPd);
    assert_eq!(
        evaluation.timepoint(100).unwrap().overall(),
        OverallResponse::Cr
    );

    // an unconfirmed CR is ignored; non-CR/non-PD met the duration and
    // counts as stable disease
    assert_eq!(evaluation.best.category, OverallResponse::Sd);
    assert_eq!(evaluation.best.day, Some(50));
    assert!(evaluation.best.confirmed);
}

#[test]
fn test_stable_disease_minimum_duration() {
    let short = target_series(SUBJECT, &[(-1, 100.0), (40, 95.0)]);
    let evaluation = evaluate(&short, &ResponseConfig::default());
    assert_eq!(evaluation.best.category, OverallResponse::Ne);
    assert_eq!(evaluation.best.day, None);

    // 42 days after baseline is exactly the minimum
    let long = target_series(SUBJECT, &[(1, 100.0), (43, 95.0)]);
    let config = ResponseConfig::builder()
        .baseline_policy(BaselinePolicy::First)
        .build()
        .unwrap();
    let evaluation = evaluate(&long, &config);
    assert_eq!(evaluation.best.category, OverallResponse::Sd);
    assert_eq!(evaluation.best.day, Some(43));
}

#[test]
fn test_progression_needs_both_relative_and_absolute_rise() {
    // nadir 20 mm; 24 mm is +20% but only +4 mm
    let measurements = target_series(SUBJECT, &[(-1, 30.0), (42, 20.0), (84, 24.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());
    assert_eq!(
        evaluation.timepoint(84).unwrap().response.target,
        TargetCategory::Sd
    );

    let measurements = target_series(SUBJECT, &[(-1, 40.0), (42, 25.0), (84, 30.0)]);
    let evaluation = evaluate(&measurements, &ResponseConfig::default());
    assert_eq!(
        evaluation.timepoint(84).unwrap().response.target,
        TargetCategory::Pd
    );
}

#[test]
fn test_enaworu_simplification_with_custom_absolute_threshold() {
    let measurements = target_series(SUBJECT, &[(-1, 30.0), (42, 20.0), (84, 23.0)]);
    let thresholds = RecistThresholds {
        pd_absolute_mm: 3.0,
        ..RecistThresholds::default()
    };

    let standard = ResponseConfig::builder()
        .recist(thresholds.clone())
        .build()
        .unwrap();
    let evaluation = evaluate(&measurements, &standard);
    assert_eq!(
        evaluation.timepoint(84).unwrap().response.target,
        TargetCategory::Sd
    );

    let simplified = ResponseConfig::builder()
        .recist(thresholds)
        .enaworu_simplification(true)
        .build()
        .unwrap();
    let evaluation = evaluate(&measurements, &simplified);
    assert_eq!(
        evaluation.timepoint(84).unwrap().response.target,
        TargetCategory::Pd
    );
}

#[test]
fn test_enaworu_matches_standard_rule_with_default_thresholds() {
    for sld in [22.0, 24.0, 24.9, 25.0, 26.0] {
        let measurements = target_series(SUBJECT, &[(-1, 30.0), (42, 20.0), (84, sld)]);
        let standard = evaluate(&measurements, &ResponseConfig::default());
        let simplified = evaluate(
            &measurements,
            &ResponseConfig::builder()
                .enaworu_simplification(true)
                .build()
                .unwrap(),
        );
        assert_eq!(
            standard.timepoint(84).unwrap().response.target,
            simplified.timepoint(84).unwrap().response.target,
            "modes disagree at {sld} mm"
        );
    }
}

#[test]
fn test_nadir_excluding_baseline() {
    let measurements = target_series(SUBJECT, &[(-1, 50.0), (42, 45.0), (84, 54.0)]);
    let config = ResponseConfig::builder()
        .nadir_excludes_baseline(true)
        .build()
        .unwrap();
    let evaluation = evaluate(&measurements, &config);

    let day_42 = &evaluation.timepoint(42).unwrap().response;
    assert_eq!(day_42.nadir_sld, None);
    assert_eq!(day_42.pct_change_nadir, None);

    let day_84 = &evaluation.timepoint(84).unwrap().response;
    assert_eq!(day_84.nadir_sld, Some(45.0));
    assert_eq!(day_84.target, TargetCategory::Pd);
}
