//! Validation error model.

use thiserror::Error;

/// Result type used by decoding and filtering.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation failure raised while decoding a payload or resolving a query.
///
/// All variants are local and recoverable: the caller translates them into a
/// client-facing failure and discards the offending input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required key was absent from the payload.
    #[error("Invalid inventory item: missing {0}")]
    MissingField(&'static str),

    /// A value could not be coerced to the expected type, or the payload was
    /// not shaped as a mapping at all (`field` is `None` in that case).
    #[error("Invalid inventory item: request contained bad or no data")]
    InvalidType { field: Option<&'static str> },

    /// A string did not name any member of the target enumeration.
    #[error("Invalid {field} for inventory item: {value}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// A value had the right type but fell outside the field's domain.
    #[error("Invalid {field} for inventory item: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_type(field: &'static str) -> Self {
        Self::InvalidType { field: Some(field) }
    }

    /// The payload itself was not a mapping.
    pub fn not_a_mapping() -> Self {
        Self::InvalidType { field: None }
    }

    pub fn invalid_enum(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(*field),
            Self::InvalidType { field } => *field,
            Self::InvalidEnumValue { field, .. } | Self::InvalidValue { field, .. } => Some(*field),
        }
    }

    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidType { .. } => "invalid_type",
            Self::InvalidEnumValue { .. } => "invalid_enum_value",
            Self::InvalidValue { .. } => "invalid_value",
        }
    }
}
