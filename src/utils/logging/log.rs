//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use crate::models::DataQualityFlag;

/// Initialise `env_logger` with a default filter, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(default_filter: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .try_init();
}

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `items` - Number of items about to be processed
pub fn log_operation_start(operation: &str, items: usize) {
    log::info!("{operation} ({items} items)");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} items");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `subject_id` - Optional subject the warning relates to
pub fn log_warning(message: &str, subject_id: Option<&str>) {
    if let Some(subject_id) = subject_id {
        log::warn!("{subject_id}: {message}");
    } else {
        log::warn!("{message}");
    }
}

/// Log every data-quality flag raised for a subject
pub fn log_flags(subject_id: &str, flags: &[DataQualityFlag]) {
    for flag in flags {
        log_warning(&flag.to_string(), Some(subject_id));
    }
}
