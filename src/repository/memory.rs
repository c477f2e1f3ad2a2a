//! In-memory repository for testing.
//!
//! Provides [`InMemoryRepository`], a thread-safe in-memory implementation of
//! the repository traits. It records every call it receives and can be told
//! to fail the next call of a given kind, which makes it the backbone of the
//! dashboard state-machine tests.

use std::sync::{Mutex, PoisonError};

#[cfg(feature = "async")]
use core::future::{self, Future};

use crate::error::{MerchantError, Result};
use crate::models::{Merchant, MerchantField, MerchantId, NewMerchant};

/// Kind of repository operation, used for failure injection and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list_all`
    ListAll,
    /// `fetch`
    Fetch,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `remove`
    Remove,
}

/// A call received by [`InMemoryRepository`], with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryCall {
    /// `list_all()`
    ListAll,
    /// `fetch(id)`
    Fetch(MerchantId),
    /// `create(draft)`
    Create(NewMerchant),
    /// `update(id, record)`
    Update(MerchantId, Merchant),
    /// `remove(id)`
    Remove(MerchantId),
}

impl RepositoryCall {
    /// Returns the operation kind of this call.
    #[inline]
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match *self {
            Self::ListAll => Operation::ListAll,
            Self::Fetch(_) => Operation::Fetch,
            Self::Create(_) => Operation::Create,
            Self::Update(..) => Operation::Update,
            Self::Remove(_) => Operation::Remove,
        }
    }
}

/// Thread-safe in-memory merchant collection for testing.
///
/// This type implements both [`super::Repository`] (async) and
/// [`super::BlockingRepository`] (blocking). Identifiers are assigned in
/// ascending order starting after the highest seeded identifier. Unknown
/// identifiers produce a 404 [`MerchantError::Api`], blank required fields a
/// 400 carrying a per-field validation body.
///
/// # Example
///
/// ```rust
/// use merchant_admin::repository::{InMemoryRepository, Operation};
///
/// let repository = InMemoryRepository::new();
/// repository.fail_next(Operation::Create).unwrap();
/// assert!(repository.calls().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Inner>,
}

/// Inner mutable state.
#[derive(Debug, Default)]
struct Inner {
    /// Stored merchants, in insertion order.
    merchants: Vec<Merchant>,
    /// Identifier handed to the next created merchant.
    next_id: i64,
    /// Every call received, oldest first.
    calls: Vec<RepositoryCall>,
    /// Pending one-shot failures.
    failures: Vec<Operation>,
}

impl Inner {
    /// Looks up a merchant by identifier.
    fn find(&self, id: MerchantId) -> Result<Merchant> {
        self.merchants
            .iter()
            .find(|merchant| merchant.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Validates and stores a new merchant under a fresh identifier.
    fn insert(&mut self, draft: &NewMerchant) -> Result<()> {
        reject_blank(&draft.missing_fields())?;
        self.next_id = self.next_id.max(1);
        let id = MerchantId::new(self.next_id);
        self.next_id += 1;
        self.merchants.push(draft.clone().into_merchant(id));
        Ok(())
    }

    /// Replaces a stored merchant, keeping its identifier.
    fn replace(&mut self, id: MerchantId, record: &Merchant) -> Result<()> {
        reject_blank(&record.missing_fields())?;
        let slot = self
            .merchants
            .iter_mut()
            .find(|merchant| merchant.id == id)
            .ok_or_else(|| not_found(id))?;
        *slot = Merchant {
            id,
            ..record.clone()
        };
        Ok(())
    }

    /// Deletes a stored merchant.
    fn delete(&mut self, id: MerchantId) -> Result<()> {
        let position = self
            .merchants
            .iter()
            .position(|merchant| merchant.id == id)
            .ok_or_else(|| not_found(id))?;
        let _removed = self.merchants.remove(position);
        Ok(())
    }
}

impl InMemoryRepository {
    /// Creates a new empty repository.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given merchants.
    #[inline]
    #[must_use]
    pub fn with_merchants(merchants: Vec<Merchant>) -> Self {
        let next_id = merchants
            .iter()
            .map(|merchant| merchant.id.into_inner())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            inner: Mutex::new(Inner {
                merchants,
                next_id,
                calls: Vec::new(),
                failures: Vec::new(),
            }),
        }
    }

    /// Makes the next call of kind `operation` fail with a 500 API error.
    ///
    /// Failures queue up: calling this twice fails the next two calls.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Repository`] if the lock is poisoned.
    #[inline]
    pub fn fail_next(&self, operation: Operation) -> Result<()> {
        self.with_lock(|inner| inner.failures.push(operation))
    }

    /// Returns every call received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Repository`] if the lock is poisoned.
    #[inline]
    pub fn calls(&self) -> Result<Vec<RepositoryCall>> {
        self.with_lock(|inner| inner.calls.clone())
    }

    /// Returns how many calls of kind `operation` were received.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Repository`] if the lock is poisoned.
    #[inline]
    pub fn call_count(&self, operation: Operation) -> Result<usize> {
        self.with_lock(|inner| {
            inner
                .calls
                .iter()
                .filter(|call| call.operation() == operation)
                .count()
        })
    }

    /// Forgets the recorded calls.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Repository`] if the lock is poisoned.
    #[inline]
    pub fn clear_calls(&self) -> Result<()> {
        self.with_lock(|inner| inner.calls.clear())
    }

    /// Returns the stored merchants without recording a call.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Repository`] if the lock is poisoned.
    #[inline]
    pub fn snapshot(&self) -> Result<Vec<Merchant>> {
        self.with_lock(|inner| inner.merchants.clone())
    }

    /// Deletes a merchant behind the client's back, without recording a
    /// call. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Repository`] if the lock is poisoned.
    #[inline]
    pub fn purge(&self, id: MerchantId) -> Result<bool> {
        self.with_lock(|inner| inner.delete(id).is_ok())
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }

    /// Records `call`, consumes a pending failure for its kind if any, and
    /// otherwise applies `f`.
    fn execute<R>(
        &self,
        call: RepositoryCall,
        f: impl FnOnce(&mut Inner) -> Result<R>,
    ) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        let operation = call.operation();
        inner.calls.push(call);
        if let Some(position) = inner.failures.iter().position(|&op| op == operation) {
            let _consumed = inner.failures.remove(position);
            tracing::debug!(?operation, "injecting repository failure");
            return Err(MerchantError::Api {
                status: 500,
                message: "injected failure".to_owned(),
            });
        }
        f(&mut inner)
    }

    /// Shared body of `list_all`.
    fn run_list_all(&self) -> Result<Vec<Merchant>> {
        self.execute(RepositoryCall::ListAll, |inner| Ok(inner.merchants.clone()))
    }

    /// Shared body of `fetch`.
    fn run_fetch(&self, id: MerchantId) -> Result<Merchant> {
        self.execute(RepositoryCall::Fetch(id), |inner| inner.find(id))
    }

    /// Shared body of `create`.
    fn run_create(&self, draft: &NewMerchant) -> Result<()> {
        self.execute(RepositoryCall::Create(draft.clone()), |inner| {
            inner.insert(draft)
        })
    }

    /// Shared body of `update`.
    fn run_update(&self, id: MerchantId, record: &Merchant) -> Result<()> {
        self.execute(RepositoryCall::Update(id, record.clone()), |inner| {
            inner.replace(id, record)
        })
    }

    /// Shared body of `remove`.
    fn run_remove(&self, id: MerchantId) -> Result<()> {
        self.execute(RepositoryCall::Remove(id), |inner| inner.delete(id))
    }
}

/// Builds the 404 error returned for unknown identifiers.
fn not_found(id: MerchantId) -> MerchantError {
    MerchantError::Api {
        status: 404,
        message: format!("No merchant matches id {id}."),
    }
}

/// Rejects a payload with blank required fields, the way the server does.
fn reject_blank(missing: &[MerchantField]) -> Result<()> {
    if missing.is_empty() {
        return Ok(());
    }
    let body: serde_json::Map<String, serde_json::Value> = missing
        .iter()
        .map(|field| {
            (
                field.key().to_owned(),
                serde_json::json!(["This field may not be blank."]),
            )
        })
        .collect();
    Err(MerchantError::Api {
        status: 400,
        message: serde_json::Value::Object(body).to_string(),
    })
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &PoisonError<T>) -> MerchantError {
    MerchantError::Repository(err.to_string().into())
}

// ── BlockingRepository implementation ───────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingRepository for InMemoryRepository {
    #[inline]
    fn list_all(&self) -> Result<Vec<Merchant>> {
        self.run_list_all()
    }

    #[inline]
    fn fetch(&self, id: MerchantId) -> Result<Merchant> {
        self.run_fetch(id)
    }

    #[inline]
    fn create(&self, draft: &NewMerchant) -> Result<()> {
        self.run_create(draft)
    }

    #[inline]
    fn update(&self, id: MerchantId, record: &Merchant) -> Result<()> {
        self.run_update(id, record)
    }

    #[inline]
    fn remove(&self, id: MerchantId) -> Result<()> {
        self.run_remove(id)
    }
}

// ── Repository (async) implementation ───────────────────────────────────

#[cfg(feature = "async")]
impl super::Repository for InMemoryRepository {
    #[inline]
    fn list_all(&self) -> impl Future<Output = Result<Vec<Merchant>>> + Send {
        future::ready(self.run_list_all())
    }

    #[inline]
    fn fetch(&self, id: MerchantId) -> impl Future<Output = Result<Merchant>> + Send {
        future::ready(self.run_fetch(id))
    }

    #[inline]
    fn create(&self, draft: &NewMerchant) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.run_create(draft))
    }

    #[inline]
    fn update(
        &self,
        id: MerchantId,
        record: &Merchant,
    ) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.run_update(id, record))
    }

    #[inline]
    fn remove(&self, id: MerchantId) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.run_remove(id))
    }
}
