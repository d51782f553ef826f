/// Errors raised while reading camera state from external data.
///
/// Index mistakes (`Vec6::from_index(7)`) are programming errors and panic instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid Vec6 array: expected 6 values, got {0}")]
    InvalidVectorLength(usize),

    #[error("Invalid Mat6 array: expected 36 values, got {0}")]
    InvalidMatrixLength(usize),

    #[error("Non-finite value {value} at index {index}")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("Invalid simplified rotation: {0}")]
    InvalidSimplifiedRotation(String),

    #[error("Invalid bailout radius: {0}")]
    InvalidBailoutRadius(String),

    #[error("Preset carries both an orientation matrix and a simplified rotation")]
    ConflictingOrientation,

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that every element is finite, reporting the first offender.
pub(crate) fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteValue {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
