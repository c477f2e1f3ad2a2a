//! Merchant status values and their presentation buckets.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a merchant.
///
/// Serialized as the plain status string. Strings outside the three known
/// values are kept verbatim in [`MerchantStatus::Other`] so that a record
/// carrying a status this client does not know still loads, and is written
/// back unchanged on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MerchantStatus {
    /// Awaiting review. Default for new merchants.
    #[default]
    Pending,
    /// Approved and trading.
    Active,
    /// Temporarily blocked.
    Suspended,
    /// Any status string not recognized by this client.
    Other(String),
}

impl MerchantStatus {
    /// The three statuses a user can pick from.
    pub const CHOICES: [Self; 3] = [Self::Pending, Self::Active, Self::Suspended];

    /// Returns the wire representation of the status.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match *self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Other(ref other) => other,
        }
    }

    /// Returns the presentation bucket for this status.
    #[inline]
    #[must_use]
    pub fn style(&self) -> StatusStyle {
        StatusStyle::classify(self.as_str())
    }
}

impl From<String> for MerchantStatus {
    #[inline]
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "Active" => Self::Active,
            "Suspended" => Self::Suspended,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for MerchantStatus {
    #[inline]
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<MerchantStatus> for String {
    #[inline]
    fn from(value: MerchantStatus) -> Self {
        match value {
            MerchantStatus::Other(other) => other,
            MerchantStatus::Pending | MerchantStatus::Active | MerchantStatus::Suspended => {
                value.as_str().to_owned()
            }
        }
    }
}

impl core::fmt::Display for MerchantStatus {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation bucket derived from a status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusStyle {
    /// Active merchants.
    Active,
    /// Suspended merchants.
    Suspended,
    /// Pending merchants and every unrecognized status.
    Pending,
}

impl StatusStyle {
    /// Maps a raw status string to its bucket.
    ///
    /// Matching is exact. Anything other than `"Active"` or `"Suspended"`,
    /// the empty string included, lands in [`StatusStyle::Pending`].
    #[inline]
    #[must_use]
    pub fn classify(status: &str) -> Self {
        match status {
            "Active" => Self::Active,
            "Suspended" => Self::Suspended,
            _ => Self::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_statuses() {
        assert_eq!(StatusStyle::classify("Active"), StatusStyle::Active);
        assert_eq!(StatusStyle::classify("Suspended"), StatusStyle::Suspended);
        assert_eq!(StatusStyle::classify("Pending"), StatusStyle::Pending);
    }

    #[test]
    fn classify_unknown_falls_into_pending_bucket() {
        assert_eq!(StatusStyle::classify(""), StatusStyle::Pending);
        assert_eq!(StatusStyle::classify("Archived"), StatusStyle::Pending);
        assert_eq!(StatusStyle::classify("active"), StatusStyle::Pending);
    }

    #[test]
    fn status_serde_known_values() {
        let variants = [
            (MerchantStatus::Pending, r#""Pending""#),
            (MerchantStatus::Active, r#""Active""#),
            (MerchantStatus::Suspended, r#""Suspended""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: MerchantStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: MerchantStatus = serde_json::from_str(r#""Archived""#).unwrap();
        assert_eq!(status, MerchantStatus::Other("Archived".to_owned()));
        assert_eq!(status.style(), StatusStyle::Pending);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Archived""#);
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(MerchantStatus::default(), MerchantStatus::Pending);
    }

    #[test]
    fn status_display_and_style() {
        assert_eq!(MerchantStatus::Suspended.to_string(), "Suspended");
        assert_eq!(MerchantStatus::Active.style(), StatusStyle::Active);
        assert_eq!(MerchantStatus::from("Suspended"), MerchantStatus::Suspended);
    }
}
