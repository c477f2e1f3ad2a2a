//! Collection response of the merchant list endpoint.

use serde::Deserialize;

use super::Merchant;

/// Body of `GET /merchant/`.
///
/// The server answers either with a bare array or with an object that wraps
/// the array under `results` (paginated form). The wrapped form is tried
/// first; extra keys such as `count` or `next` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MerchantPage {
    /// `{ "results": [...] }`
    Wrapped {
        /// Records under the `results` key.
        results: Vec<Merchant>,
    },
    /// `[...]`
    Bare(Vec<Merchant>),
}

impl MerchantPage {
    /// Unwraps the records regardless of the response shape.
    #[inline]
    #[must_use]
    pub fn into_merchants(self) -> Vec<Merchant> {
        match self {
            Self::Wrapped { results } | Self::Bare(results) => results,
        }
    }
}

impl From<MerchantPage> for Vec<Merchant> {
    #[inline]
    fn from(page: MerchantPage) -> Self {
        page.into_merchants()
    }
}
