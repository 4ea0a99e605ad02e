//! Errors reported by the container family.
//!
//! Absence is not an error: lookups return `Option`/`bool`. Only contract
//! violations on positional access and failed growth are reported here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// A construction parameter was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A positional operation addressed a slot past the end.
    #[error("index {index} out of range for container with {len} slots")]
    IndexOutOfRange { index: usize, len: usize },

    /// A positional accessor hit an explicit gap.
    #[error("slot {index} is empty")]
    EmptySlot { index: usize },

    /// The slot array could not be grown. The container is unchanged.
    #[error("failed to grow container to {requested} slots")]
    AllocationFailure { requested: usize },

    /// An element or tag produced a bucket index the hash container does not have.
    #[error("hash index {index} out of range for {buckets} buckets")]
    HashOutOfRange { index: usize, buckets: usize },
}

pub type Result<T, E = ContainerError> = core::result::Result<T, E>;
