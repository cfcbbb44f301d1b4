use tumor_response::{
    LesionResult, Measurement, ResponseConfig, SubjectEvaluation, SubjectOutcome,
    evaluate_subject, init_logging,
};

/// Default subject identifier used by single-subject tests
pub const SUBJECT: &str = "SUBJ-001";

/// Tolerance for comparing percent changes
pub const PCT_EPSILON: f64 = 1e-6;

/// Single target lesion `T1` measured on each `(day, diameter)` pair
#[must_use]
pub fn target_series(subject_id: &str, points: &[(i32, f64)]) -> Vec<Measurement> {
    points
        .iter()
        .map(|&(day, diameter)| Measurement::target(subject_id, "T1", day, diameter))
        .collect()
}

/// Non-target lesion `NT1` reported on `day`
#[must_use]
pub fn non_target(subject_id: &str, day: i32, result: LesionResult) -> Measurement {
    Measurement::non_target(subject_id, "NT1", day, result)
}

/// Evaluate one subject and return its evaluation, panicking on no-data
pub fn evaluate(measurements: &[Measurement], config: &ResponseConfig) -> SubjectEvaluation {
    init_logging("warn");
    let subject_id = measurements
        .first()
        .map_or(SUBJECT, |measurement| measurement.subject_id.as_str());
    match evaluate_subject(subject_id, measurements, None, config) {
        SubjectOutcome::Evaluated(evaluation) => evaluation,
        SubjectOutcome::NoData { subject_id, .. } => {
            panic!("expected an evaluation for {subject_id}")
        }
    }
}

/// Assert two optional percent changes agree within [`PCT_EPSILON`]
pub fn assert_pct(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected}%, got none"));
    assert!(
        (actual - expected).abs() < PCT_EPSILON,
        "expected {expected}%, got {actual}%"
    );
}
