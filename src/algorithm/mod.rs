//! Algorithm implementations for response assessment
//!
//! This module contains the response derivation pipeline and the
//! indication-specific classification criteria it plugs in.

pub mod response;
