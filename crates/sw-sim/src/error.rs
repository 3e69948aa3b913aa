use sw_core::SensorId;
use sw_entity::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("sensor {0} already exists")]
    DuplicateSensor(SensorId),

    #[error("simulation is not running")]
    NotRunning,

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type SimResult<T> = Result<T, SimError>;
