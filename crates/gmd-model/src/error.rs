use thiserror::Error;

/// Errors raised when parsing model values from catalog or request text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("unknown {field} value '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

impl ModelError {
    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            field,
            value: value.trim().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
