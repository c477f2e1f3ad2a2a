//! Pluggable repositories for the merchant collection.
//!
//! This module defines the [`Repository`] (async) and [`BlockingRepository`]
//! (blocking) traits via a shared macro, mirroring the client generation
//! pattern in [`crate::client`]. The HTTP clients implement them, and so does
//! [`InMemoryRepository`] for tests.

mod memory;

pub use memory::{InMemoryRepository, Operation, RepositoryCall};

/// Generates a repository trait (async or blocking) with all operations.
///
/// Uses `@methods` to define the method list once, and `@method` to render
/// each method in async (`impl Future + Send`) or blocking (`fn`) style.
macro_rules! define_repository {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_repository!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_repository!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        define_repository!(@method $mode, list_all,
            "Returns every merchant, in server order.\n\nAccepts both the bare-array and the `results`-wrapped collection shape.\n\n# Errors\n\nReturns an error if the request fails, the server returns a non-success status, or the body is malformed.",
            -> Result<Vec<Merchant>>);
        define_repository!(@method $mode, fetch,
            "Returns a single merchant by identifier.\n\n# Errors\n\nReturns an error if the request fails or the merchant does not exist.",
            id: MerchantId, -> Result<Merchant>);
        define_repository!(@method $mode, create,
            "Persists a new merchant. The server assigns its identifier.\n\n# Errors\n\nReturns an error if the request fails or the server rejects the payload.",
            draft: &NewMerchant, -> Result<()>);
        define_repository!(@method $mode, update,
            "Replaces the merchant identified by `id` with `record`.\n\n# Errors\n\nReturns an error if the request fails or the server rejects the payload.",
            id: MerchantId, record: &Merchant, -> Result<()>);
        define_repository!(@method $mode, remove,
            "Deletes the merchant identified by `id`.\n\n# Errors\n\nReturns an error if the request fails or the server reports a non-success status.",
            id: MerchantId, -> Result<()>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_repository {
    //! Async repository trait definition.

    use crate::error::Result;
    use crate::models::{Merchant, MerchantId, NewMerchant};

    define_repository! {
        trait_name: Repository,
        trait_doc: "Async access to the merchant collection.\n\nAll methods take `&self`; implementations needing mutation use interior\nmutability.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_repository {
    //! Blocking repository trait definition.

    use crate::error::Result;
    use crate::models::{Merchant, MerchantId, NewMerchant};

    define_repository! {
        trait_name: BlockingRepository,
        trait_doc: "Blocking access to the merchant collection.\n\nAll methods take `&self`; implementations needing mutation use interior\nmutability.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_repository::Repository;
#[cfg(feature = "blocking")]
pub use blocking_repository::BlockingRepository;
