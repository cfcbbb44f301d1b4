//! Input collections
//!
//! This module provides the indexed containers that feed batch evaluation.

pub mod measurement;

pub use measurement::MeasurementCollection;
