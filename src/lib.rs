//! Best overall response derivation for oncology trials.
//!
//! Lesion-level measurements are aggregated per assessment day, tracked
//! against a baseline and a running nadir, classified under RECIST 1.1, IMWG
//! or Palladini criteria, combined into an overall timepoint response,
//! confirmed, and reduced to one best overall response per subject.
//!
//! ```no_run
//! use tumor_response::{MeasurementCollection, ResponseConfig, evaluate_batch};
//!
//! # fn main() -> tumor_response::Result<()> {
//! let measurements = MeasurementCollection::new();
//! let report = evaluate_batch(&measurements, None, &ResponseConfig::default())?;
//! for best in report.best_responses() {
//!     println!("{best}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::response::{
    BatchReport, SubjectEvaluation, SubjectOutcome, evaluate_batch, evaluate_subject,
};
pub use collections::MeasurementCollection;
pub use config::{
    BaselinePolicy, ConfirmationWindow, ImwgThresholds, Indication, PalladiniThresholds,
    RecistThresholds, ResponseConfig, ResponseConfigBuilder,
};
pub use error::{ResponseError, Result};
pub use models::{
    BestOverallResponse, ConfirmedResponse, DataQualityFlag, LesionRegistry, LesionResult,
    LesionRole, Measurement, NonTargetCategory, OverallResponse, ResponseGrade, TargetCategory,
    TimepointResponse,
};
pub use utils::logging::init_logging;
