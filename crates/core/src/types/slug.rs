//! URL slugs for published documents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum slug length.
const MAX_SLUG_LENGTH: usize = 128;

/// Slug validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,
    #[error("slug too long (max {MAX_SLUG_LENGTH} characters)")]
    TooLong,
    #[error("slug contains invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A validated URL slug: lowercase ASCII letters, digits, and interior hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Parse and validate a slug.
    ///
    /// # Errors
    ///
    /// Returns `SlugError` if the input is empty, too long, contains a
    /// character outside `[a-z0-9-]`, or has a leading/trailing hyphen.
    pub fn parse(input: &str) -> Result<Self, SlugError> {
        if input.is_empty() {
            return Err(SlugError::Empty);
        }
        if input.len() > MAX_SLUG_LENGTH {
            return Err(SlugError::TooLong);
        }
        if input.starts_with('-') || input.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }
        for c in input.chars() {
            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
                return Err(SlugError::InvalidCharacter(c));
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
