use thiserror::Error;

/// Boxed cause returned by a shape factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error("required value {0} is empty or not set")]
    MissingRequiredValue(String),

    #[error("failed to construct '{shape}': {source}")]
    ShapeConstructionFailure {
        shape: &'static str,
        source: BoxError,
    },

    #[error("invalid descriptor on field '{field}' of '{shape}': {reason}")]
    InvalidDescriptor {
        shape: &'static str,
        field: String,
        reason: DescriptorIssue,
    },
}

impl BindError {
    /// The external key that was missing, if this is a missing-value error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            BindError::MissingRequiredValue(key) => Some(key),
            _ => None,
        }
    }
}

/// Why a descriptor was rejected at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptorIssue {
    #[error("external key is empty")]
    EmptyKey,

    #[error("field is registered more than once")]
    DuplicateField,
}
