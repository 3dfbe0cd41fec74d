use thiserror::Error;

use crate::location::Direction;

/// Errors raised at the few fallible edges of the crate.
///
/// The layout, classifier, elevation and flow computations are total and never
/// produce these; only input validation and record decoding do.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("duplicate location id `{0}`")]
    DuplicateLocationId(String),

    #[error("location `{location}` has more than one {direction} exit")]
    DuplicateExit { location: String, direction: Direction },

    #[error("invalid layout parameters: {0}")]
    InvalidParams(String),

    #[error("invalid location records: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
