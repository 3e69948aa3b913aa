use sw_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    /// Geo math rejected a position (out-of-range or non-finite coordinate).
    #[error(transparent)]
    Geo(#[from] CoreError),
}

pub type MotionResult<T> = Result<T, MotionError>;
