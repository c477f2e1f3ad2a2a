//! Data models for the merchant resource.
//!
//! This module contains the strongly-typed merchant record, the creation
//! payload, the identifier newtype, the status enumeration and the
//! shape-tolerant list response.

mod enums;
mod ids;
mod merchant;
mod page;

pub use enums::{MerchantStatus, StatusStyle};
pub use ids::MerchantId;
pub use merchant::{Merchant, MerchantField, NewMerchant};
pub use page::MerchantPage;
