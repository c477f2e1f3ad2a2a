//! Merchant record and its creation payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{MerchantId, MerchantStatus};

/// One of the editable free-text fields of a merchant.
///
/// Status is not listed here; it is set through its own typed setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MerchantField {
    /// Display name.
    Name,
    /// Business registration number.
    BusinessRegistrationNumber,
    /// Contact email address.
    Email,
    /// Contact phone number.
    Phone,
}

impl MerchantField {
    /// All editable fields, in form order.
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::BusinessRegistrationNumber,
        Self::Email,
        Self::Phone,
    ];

    /// Returns the JSON key of the field.
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::BusinessRegistrationNumber => "business_registration_number",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Returns a human-readable label for the field.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "merchant name",
            Self::BusinessRegistrationNumber => "business registration number",
            Self::Email => "email address",
            Self::Phone => "phone number",
        }
    }
}

impl core::fmt::Display for MerchantField {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Generates field accessors shared by [`Merchant`] and [`NewMerchant`].
macro_rules! impl_merchant_fields {
    ($ty:ident) => {
        impl $ty {
            /// Returns the current value of a text field.
            #[inline]
            #[must_use]
            pub fn field(&self, field: MerchantField) -> &str {
                match field {
                    MerchantField::Name => &self.name,
                    MerchantField::BusinessRegistrationNumber => {
                        &self.business_registration_number
                    }
                    MerchantField::Email => &self.email,
                    MerchantField::Phone => &self.phone,
                }
            }

            /// Replaces the value of a single text field.
            #[inline]
            pub fn set_field<T: Into<String>>(&mut self, field: MerchantField, value: T) {
                let slot = match field {
                    MerchantField::Name => &mut self.name,
                    MerchantField::BusinessRegistrationNumber => {
                        &mut self.business_registration_number
                    }
                    MerchantField::Email => &mut self.email,
                    MerchantField::Phone => &mut self.phone,
                };
                *slot = value.into();
            }

            /// Returns the required fields that are empty or whitespace only.
            #[inline]
            #[must_use]
            pub fn missing_fields(&self) -> Vec<MerchantField> {
                MerchantField::ALL
                    .into_iter()
                    .filter(|&field| self.field(field).trim().is_empty())
                    .collect()
            }
        }
    };
}

/// A merchant record as stored on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Server-assigned identifier.
    pub id: MerchantId,
    /// Display name.
    pub name: String,
    /// Business registration number (opaque).
    pub business_registration_number: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number (opaque). A `null` from the server reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: MerchantStatus,
    /// Creation timestamp, maintained by the server.
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp, maintained by the server.
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_merchant_fields!(Merchant);

impl Merchant {
    /// Returns `"name (registration number)"`, used in confirmation prompts.
    #[inline]
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.business_registration_number)
    }
}

/// Payload for creating a merchant. Carries no identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMerchant {
    /// Display name.
    pub name: String,
    /// Business registration number (opaque).
    pub business_registration_number: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number (opaque).
    pub phone: String,
    /// Initial lifecycle status.
    pub status: MerchantStatus,
}

impl_merchant_fields!(NewMerchant);

impl NewMerchant {
    /// Returns `true` when every text field is empty and status is the
    /// default.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Attaches a server-assigned identifier, producing a full record.
    #[inline]
    #[must_use]
    pub fn into_merchant(self, id: MerchantId) -> Merchant {
        Merchant {
            id,
            name: self.name,
            business_registration_number: self.business_registration_number,
            email: self.email,
            phone: self.phone,
            status: self.status,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Deserializes an optional string, mapping `null` to the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
