use thiserror::Error;

pub use crate::classifier::IntrospectError;
pub use crate::discovery::{DiscoverError, MountError};
pub use crate::engine::EngineError;

/// Top-level error for library callers driving the whole pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Introspect(#[from] IntrospectError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, Error>;
