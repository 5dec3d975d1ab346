//! Error types for the statistics pipeline and the profile builder.

use crate::models::GeoLevel;
use thiserror::Error;

/// Errors raised by the pure statistics helpers (aggregation, recoding, median).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// A raw category label has no entry in the recode table.
    ///
    /// Never recovered from: dropping the row would silently corrupt a total.
    #[error("unknown category label: {label:?}")]
    UnknownCategory { label: String },

    /// The distribution is empty or its total is zero.
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

/// Errors raised while resolving tables, fetching rows, or building profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No rows exist for the requested geography.
    #[error("{table}: {level} with code '{code}' not found")]
    LocationNotFound {
        table: String,
        level: GeoLevel,
        code: String,
    },

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("invalid geo level: {0}")]
    InvalidGeoLevel(String),

    #[error("invalid field: {0}")]
    InvalidField(String),

    /// The generated table name cannot be shortened below the length limit.
    #[error("table name for {fields:?} exceeds {limit} characters")]
    TableNameTooLong { fields: Vec<String>, limit: usize },

    /// The backing store returned malformed data.
    #[error("data source error: {0}")]
    Source(String),
}

impl ProfileError {
    /// `true` for a definitive miss on a geography.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::LocationNotFound { .. })
    }
}

pub type Result<T, E = ProfileError> = std::result::Result<T, E>;
