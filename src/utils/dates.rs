//! Study-day arithmetic

use chrono::NaiveDate;

/// Study day of `date` relative to `reference` (usually the first dose date).
///
/// Follows the CDISC convention with no day 0: the reference date is day 1
/// and the day before it is day -1.
#[must_use]
pub fn study_day(reference: NaiveDate, date: NaiveDate) -> i32 {
    // NaiveDate spans fewer than i32::MAX days
    let diff = (date - reference).num_days() as i32;
    if diff >= 0 { diff + 1 } else { diff }
}
