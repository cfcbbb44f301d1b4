//! Data models for tumor response assessment
//!
//! This module contains the measurement input records, the response
//! categories and records produced by the engine, and the data-quality flags
//! attached to subject evaluations.

pub mod measurement;
pub mod quality;
pub mod response;

pub use measurement::{LesionRegistry, LesionResult, LesionRole, Measurement};
pub use quality::{DataQualityFlag, DayOrderIssue};
pub use response::{
    BestOverallResponse, ConfirmedResponse, NonTargetCategory, OverallResponse, ResponseGrade,
    TargetCategory, TimepointResponse,
};
