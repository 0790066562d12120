use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("capacity must be a number greater than or equal to 2, got `{0}`")]
    InvalidCapacity(String),

    #[error("initial values must be an ordered sequence: {0}")]
    InvalidInitialValues(String),

    #[error("{len} initial values do not fit into a capacity of {capacity}")]
    InitialValuesTooLarge { len: usize, capacity: usize },

    #[error("buffer is full")]
    BufferFull,

    #[error("buffer doesn't have any element")]
    BufferEmpty,
}

pub type Result<T, E = RingBufferError> = std::result::Result<T, E>;
