//! Utility functions shared by the response engine
//!
//! This module provides the study-day helper and logging/progress utilities.

pub mod dates;
pub mod logging;

pub use dates::study_day;
