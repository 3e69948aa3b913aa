use sw_core::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("the INVALID sentinel is not a usable entity id")]
    ReservedId,
}

pub type WorldResult<T> = Result<T, WorldError>;
