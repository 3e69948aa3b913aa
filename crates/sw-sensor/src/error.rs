use sw_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    /// Geo math rejected a position (out-of-range or non-finite coordinate).
    #[error(transparent)]
    Geo(#[from] CoreError),
}

pub type SensorResult<T> = Result<T, SensorError>;
