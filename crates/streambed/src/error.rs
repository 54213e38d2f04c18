//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! rejected bed partitions, malformed particle tables, flux ledger misuse, invalid
//! configuration, and generic errors. The entrainment selector itself never fails.
use thiserror::Error;

use crate::bed::Uid;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid subregion count {0}: must be > 0")]
    InvalidSubregionCount(u32),

    #[error("bed length {bed_length} is not evenly divisible by {subregion_count} subregions")]
    InexactPartition {
        bed_length: u32,
        subregion_count: u32,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid particle table: {0}")]
    InvalidParticleTable(String),

    #[error("duplicate particle uid {0}")]
    DuplicateUid(Uid),

    #[error("iteration {iteration} out of range for flux ledger of length {len}")]
    IterationOutOfRange { iteration: usize, len: usize },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
