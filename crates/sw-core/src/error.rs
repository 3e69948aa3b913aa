//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant (see `sw-motion` and `sw-sensor`).  Geo math is the only
//! fallible code in this crate: every invalid lat/lon/altitude surfaces as
//! [`CoreError::InvalidCoordinate`] at the call site that received it.

use thiserror::Error;

/// The top-level error type for `sw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate: lat {lat_deg}°, lon {lon_deg}°, alt {alt_m} m")]
    InvalidCoordinate {
        lat_deg: f64,
        lon_deg: f64,
        alt_m:   f64,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `sw-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
