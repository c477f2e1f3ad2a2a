//! Newtype wrapper for merchant identifiers.
//!
//! Identifiers are assigned by the server and only ever read back by the
//! client, so the wrapper offers no arithmetic and no mutation.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapping a `Copy` inner type.
macro_rules! define_copy_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Creates a new identifier from the given value.
            #[inline]
            #[must_use]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner value.
            #[inline]
            #[must_use]
            pub const fn as_inner(&self) -> &$inner {
                &self.0
            }

            /// Consumes the wrapper and returns the inner value.
            #[inline]
            #[must_use]
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl core::str::FromStr for $name {
            type Err = core::num::ParseIntError;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }
    };
}

define_copy_id! {
    /// Server-assigned identifier of a merchant record.
    MerchantId(i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_id_serializes_as_bare_number() {
        let id = MerchantId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: MerchantId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn merchant_id_display() {
        assert_eq!(MerchantId::new(7).to_string(), "7");
    }

    #[test]
    fn merchant_id_from_str_trims_whitespace() {
        let id: MerchantId = " 13 ".parse().unwrap();
        assert_eq!(id.into_inner(), 13);
        assert!("abc".parse::<MerchantId>().is_err());
    }

    #[test]
    fn merchant_id_from_inner() {
        let id: MerchantId = 3_i64.into();
        assert_eq!(*id.as_inner(), 3);
    }

    #[test]
    fn merchant_id_rejects_string_payload() {
        let result = serde_json::from_str::<MerchantId>(r#""5""#);
        assert!(result.is_err());
    }
}
