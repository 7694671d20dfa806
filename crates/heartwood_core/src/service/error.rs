//! Service object error taxonomy.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by construction and invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input mapping omitted one or more required keys.
    ///
    /// Recoverable: the caller can supply the missing attributes and retry.
    MissingRequiredAttribute {
        variant: String,
        /// Every missing name, in declaration order. Never empty.
        missing: Vec<String>,
    },
    /// Variant has no call behavior.
    ///
    /// Programmer error. Only reachable for variants registered without a
    /// handler, since typed variants must implement `call`.
    CallNotImplemented { variant: String },
}

impl ServiceError {
    /// Variant name the failure belongs to.
    pub fn variant(&self) -> &str {
        match self {
            Self::MissingRequiredAttribute { variant, .. } | Self::CallNotImplemented { variant } => {
                variant
            }
        }
    }

    /// Missing attribute names, empty for other kinds.
    pub fn missing_attributes(&self) -> &[String] {
        match self {
            Self::MissingRequiredAttribute { missing, .. } => missing,
            Self::CallNotImplemented { .. } => &[],
        }
    }

    pub fn is_missing_required(&self) -> bool {
        matches!(self, Self::MissingRequiredAttribute { .. })
    }

    pub fn is_call_not_implemented(&self) -> bool {
        matches!(self, Self::CallNotImplemented { .. })
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredAttribute { variant, missing } => write!(
                f,
                "{variant} is missing required attribute(s): {}",
                missing.join(", ")
            ),
            Self::CallNotImplemented { variant } => {
                write!(f, "call is not implemented for {variant}")
            }
        }
    }
}

impl Error for ServiceError {}
