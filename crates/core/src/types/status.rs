//! Document lifecycle status.

use serde::{Deserialize, Serialize};

/// Publication status of a CMS document.
///
/// Only `Published` documents are visible to visitors; `Draft` covers both
/// never-published documents and tombstoned products (a provider-side delete
/// flips status back to draft instead of removing the record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Published,
}

impl DocumentStatus {
    /// Whether the document is visible to non-preview requests.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Database/string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(format!("invalid document status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for status in [DocumentStatus::Draft, DocumentStatus::Published] {
            let parsed: DocumentStatus = status.as_str().parse().expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Published).expect("serialize"),
            "\"published\""
        );
    }

    #[test]
    fn test_visibility() {
        assert!(DocumentStatus::Published.is_published());
        assert!(!DocumentStatus::Draft.is_published());
    }
}
