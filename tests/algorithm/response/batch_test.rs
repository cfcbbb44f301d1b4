//! Tests for parallel batch evaluation

use tumor_response::{
    LesionResult, Measurement, MeasurementCollection, OverallResponse, ResponseConfig,
    evaluate_batch,
};

use crate::utils::{non_target, target_series};

fn cohort() -> MeasurementCollection {
    let mut measurements = Vec::new();
    // confirmed partial response
    measurements.extend(target_series("S01", &[(-1, 100.0), (56, 60.0), (112, 55.0)]));
    // stable disease
    measurements.extend(target_series("S02", &[(-1, 80.0), (56, 78.0)]));
    // progression through a new lesion
    measurements.extend(target_series("S03", &[(-1, 50.0), (56, 48.0)]));
    measurements.push(Measurement::new_lesion("S03", "N1", 56));
    // no baseline
    measurements.extend(target_series("S04", &[(20, 30.0)]));
    // non-target disease only
    measurements.push(non_target("S05", -1, LesionResult::Present));
    measurements.push(non_target("S05", 60, LesionResult::Present));

    let mut collection = MeasurementCollection::from_measurements(measurements);
    collection.register_subject("S06");
    collection
}

#[test]
fn test_batch_best_responses() {
    let report = evaluate_batch(&cohort(), None, &ResponseConfig::default()).unwrap();

    assert_eq!(report.subject_count(), 5);
    assert_eq!(report.no_data, vec!["S06".to_string()]);

    let best: Vec<(&str, OverallResponse)> = report
        .best_responses()
        .map(|best| (best.subject_id.as_str(), best.category))
        .collect();
    assert_eq!(
        best,
        vec![
            ("S01", OverallResponse::Pr),
            ("S02", OverallResponse::Sd),
            ("S03", OverallResponse::Pd),
            ("S04", OverallResponse::Ne),
            ("S05", OverallResponse::Sd),
        ]
    );
}

#[test]
fn test_batch_summary() {
    let report = evaluate_batch(&cohort(), None, &ResponseConfig::default()).unwrap();

    let counts = report.category_counts();
    assert_eq!(counts.get(&OverallResponse::Pr), Some(&1));
    assert_eq!(counts.get(&OverallResponse::Cr), None);
    assert_eq!(counts.get(&OverallResponse::Sd), Some(&2));
    assert_eq!(counts.get(&OverallResponse::NonCrNonPd), None);
    assert_eq!(counts.values().sum::<usize>(), 5);

    assert_eq!(report.flagged_subjects(), vec!["S04"]);
    assert_eq!(report.objective_response_rate(), Some(0.2));
}

#[test]
fn test_batch_matches_sequential_evaluation() {
    let collection = cohort();
    let config = ResponseConfig::default();
    let report = evaluate_batch(&collection, None, &config).unwrap();

    for evaluation in &report.evaluations {
        let outcome = tumor_response::evaluate_subject(
            &evaluation.subject_id,
            collection.measurements_for(&evaluation.subject_id),
            None,
            &config,
        );
        assert_eq!(outcome.evaluation(), Some(evaluation));
    }
}

#[test]
fn test_empty_batch() {
    let report =
        evaluate_batch(&MeasurementCollection::new(), None, &ResponseConfig::default()).unwrap();
    assert_eq!(report.subject_count(), 0);
    assert_eq!(report.objective_response_rate(), None);
}
