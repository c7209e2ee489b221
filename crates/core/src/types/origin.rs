//! Mutation-origin marker for payment-provider sync.
//!
//! Every product mutation carries one of these so the webhook handlers can
//! tell a genuine provider-side change from the echo of a change this system
//! pushed itself. Modelled as an explicit tri-state rather than an ad hoc
//! metadata lookup; the webhook loop-prevention tests assert on it directly.

use serde::{Deserialize, Serialize};

/// Metadata key the CMS stamps on records it pushes to the provider.
pub const ORIGIN_METADATA_KEY: &str = "origin";

/// Metadata value marking a record as CMS-originated.
pub const CMS_ORIGIN_TAG: &str = "cms";

/// Where a product mutation originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncOrigin {
    /// Initiated inside the CMS (editor action, seed, admin tooling).
    /// Inbound webhook events carrying this tag are no-ops.
    Local,
    /// Initiated at the payment provider by someone else.
    External,
    /// The event carried no origin metadata. Treated like `External` for
    /// sync purposes but kept distinct so the ambiguity stays visible.
    #[default]
    Unknown,
}

impl SyncOrigin {
    /// Classify an inbound event from its optional origin metadata value.
    #[must_use]
    pub fn from_metadata_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(CMS_ORIGIN_TAG) => Self::Local,
            Some(_) => Self::External,
            None => Self::Unknown,
        }
    }

    /// Whether an inbound event with this origin should be applied locally.
    ///
    /// Only `Local` is skipped: applying it again would start an update loop
    /// between the two systems.
    #[must_use]
    pub const fn should_apply_inbound(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl std::fmt::Display for SyncOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Local => "local",
            Self::External => "external",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            SyncOrigin::from_metadata_tag(Some("cms")),
            SyncOrigin::Local
        );
        assert_eq!(
            SyncOrigin::from_metadata_tag(Some("warehouse-import")),
            SyncOrigin::External
        );
        assert_eq!(SyncOrigin::from_metadata_tag(None), SyncOrigin::Unknown);
    }

    #[test]
    fn test_only_local_is_skipped() {
        assert!(!SyncOrigin::Local.should_apply_inbound());
        assert!(SyncOrigin::External.should_apply_inbound());
        assert!(SyncOrigin::Unknown.should_apply_inbound());
    }
}
