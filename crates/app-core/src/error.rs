use thiserror::Error;

/// Rejected construction parameters.
///
/// Every check happens once when a field or backdrop is built; the per-frame
/// path has no failure modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be greater than zero")]
    EmptyField,
    #[error("`{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("unknown backdrop variant `{0}`")]
    UnknownVariant(String),
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
