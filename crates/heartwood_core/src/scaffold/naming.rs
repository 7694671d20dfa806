//! Service name normalization for scaffolding.
//!
//! # Invariants
//! - Accepted names are one or more identifier segments separated by `/` or
//!   `::`, so the file stem is always a relative path below the services
//!   directory.
//! - The file stem always ends in exactly one `_service` appended to the
//!   underscored name with one trailing `_service` removed.
//! - The type name always ends in exactly one `Service` appended the same way.

use crate::scaffold::inflection::{classify, underscore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const FILE_SUFFIX: &str = "_service";
const TYPE_SUFFIX: &str = "Service";

static ALLOWED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_/:]+$").expect("valid name regex"));
static NAME_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name segment regex"));

/// Invalid scaffold name input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    Empty,
    InvalidCharacters(String),
    InvalidSegment(String),
}

impl Display for NameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "service name must not be empty"),
            Self::InvalidCharacters(value) => write!(
                f,
                "service name `{value}` may only contain letters, digits, `_`, `/` and `::`"
            ),
            Self::InvalidSegment(value) => write!(
                f,
                "service name `{value}` must be identifiers separated by single `/` or `::`"
            ),
        }
    }
}

impl Error for NameError {}

/// Normalized identifiers for one scaffolded service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceName {
    file_stem: String,
    type_name: String,
}

impl ServiceName {
    /// Normalizes free-text `name` into a file stem and a type name.
    ///
    /// - `my` -> `my_service` / `MyService`
    /// - `users` -> `users_service` / `UserService`
    /// - `admin/user` -> `admin/user_service` / `Admin::UserService`
    pub fn parse(name: &str) -> Result<Self, NameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if !ALLOWED_NAME_RE.is_match(trimmed) {
            return Err(NameError::InvalidCharacters(trimmed.to_string()));
        }
        let normalized = trimmed.replace("::", "/");
        if !normalized
            .split('/')
            .all(|segment| NAME_SEGMENT_RE.is_match(segment))
        {
            return Err(NameError::InvalidSegment(trimmed.to_string()));
        }

        let underscored = underscore(trimmed);
        let file_stem = format!(
            "{}{FILE_SUFFIX}",
            underscored.strip_suffix(FILE_SUFFIX).unwrap_or(&underscored)
        );

        let classified = classify(trimmed);
        let type_name = format!(
            "{}{TYPE_SUFFIX}",
            classified.strip_suffix(TYPE_SUFFIX).unwrap_or(&classified)
        );

        Ok(Self {
            file_stem,
            type_name,
        })
    }

    /// Relative file stem, `/` separated for namespaced names.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Fully qualified type name, `::` separated for namespaced names.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Last `::` segment of the type name.
    pub fn type_ident(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name.as_str())
    }
}
