//! Merchant dashboard: list cache plus editing session.
//!
//! Couples a [`Repository`] / [`BlockingRepository`] with four observable
//! cells: the cached merchant list, the new-merchant form, the edit draft and
//! the delete target. Every successful mutation is followed by a full reload
//! of the list; the cache is never patched locally.
//!
//! Failures are logged and returned, and the transition that would have
//! followed (resetting the form, closing the edit draft) is skipped so the
//! user can retry. Deletion is the exception: the target is cleared and the
//! list reloaded whatever the server answered.

use crate::error::{MerchantError, Result};
use crate::models::{Merchant, MerchantField, MerchantId, MerchantStatus};
use crate::session::NewMerchantForm;
use crate::state::StateCell;

#[cfg(feature = "blocking")]
use crate::repository::BlockingRepository;
#[cfg(feature = "async")]
use crate::repository::Repository;

/// Generates a dashboard (async or blocking) over a repository trait.
macro_rules! define_dashboard {
    (
        dashboard_name: $dashboard:ident,
        repository_trait: $repository_trait:ident,
        dashboard_doc: $dashboard_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $dashboard_doc]
        #[derive(Debug)]
        pub struct $dashboard<R: $repository_trait> {
            /// Remote collection.
            repository: R,
            /// Last fetched snapshot of all merchants.
            merchants: StateCell<Vec<Merchant>>,
            /// "Add merchant" form.
            form: StateCell<NewMerchantForm>,
            /// Copy of the merchant being edited, if any.
            editing: StateCell<Option<Merchant>>,
            /// Merchant awaiting delete confirmation, if any.
            pending_delete: StateCell<Option<Merchant>>,
        }

        impl<R: $repository_trait> $dashboard<R> {
            /// Creates a dashboard with an empty list and idle session.
            ///
            /// Call [`Self::start`] to perform the initial load.
            #[inline]
            #[must_use]
            pub fn new(repository: R) -> Self {
                Self {
                    repository,
                    merchants: StateCell::default(),
                    form: StateCell::default(),
                    editing: StateCell::default(),
                    pending_delete: StateCell::default(),
                }
            }

            /// Returns the underlying repository.
            #[inline]
            #[must_use]
            pub const fn repository(&self) -> &R {
                &self.repository
            }

            // ── List cache ──────────────────────────────────────────

            /// Performs the initial load of the merchant list.
            ///
            /// # Errors
            ///
            /// Returns the repository error if the list cannot be fetched; the
            /// list stays empty and the dashboard remains usable.
            #[inline]
            pub $($async_kw)? fn start(&mut self) -> Result<()> {
                tracing::info!("loading merchants");
                self.reload() $( .$await_ext )?
            }

            /// Re-fetches the whole merchant list and replaces the cache.
            ///
            /// # Errors
            ///
            /// Returns the repository error; the previous snapshot is kept.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn reload(&mut self) -> Result<()> {
                let outcome = self.repository.list_all() $( .$await_ext )?;
                match outcome {
                    Ok(merchants) => {
                        tracing::debug!(count = merchants.len(), "merchant list refreshed");
                        self.merchants.set(merchants);
                        Ok(())
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to fetch merchants");
                        Err(err)
                    }
                }
            }

            /// Returns the cached merchants, in server order.
            #[inline]
            #[must_use]
            pub fn merchants(&self) -> &[Merchant] {
                self.merchants.get()
            }

            /// Looks up a cached merchant by identifier.
            #[inline]
            #[must_use]
            pub fn merchant(&self, id: MerchantId) -> Option<&Merchant> {
                self.merchants.get().iter().find(|merchant| merchant.id == id)
            }

            /// Returns the list cache cell, for revision tracking.
            #[inline]
            #[must_use]
            pub const fn merchants_cell(&self) -> &StateCell<Vec<Merchant>> {
                &self.merchants
            }

            // ── New-merchant form ───────────────────────────────────

            /// Returns the new-merchant form.
            #[inline]
            #[must_use]
            pub const fn form(&self) -> &NewMerchantForm {
                self.form.get()
            }

            /// Returns the form cell, for revision tracking.
            #[inline]
            #[must_use]
            pub const fn form_cell(&self) -> &StateCell<NewMerchantForm> {
                &self.form
            }

            /// Updates one text field of the new-merchant form.
            #[inline]
            pub fn set_form_field<T: Into<String>>(&mut self, field: MerchantField, value: T) {
                self.form.update(|form| form.set_field(field, value));
            }

            /// Updates the status of the new-merchant form.
            #[inline]
            pub fn set_form_status(&mut self, status: MerchantStatus) {
                self.form.update(|form| form.set_status(status));
            }

            /// Submits the new-merchant form.
            ///
            /// On success the form is reset and the list reloaded. On failure
            /// the entered values are kept and nothing is reloaded.
            ///
            /// # Errors
            ///
            /// Returns [`MerchantError::MissingField`] without contacting the
            /// server if a required field is empty, the repository error if the
            /// create is rejected, or the reload error if the follow-up fetch
            /// fails.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn submit_new(&mut self) -> Result<()> {
                let mut form = self.form.get().clone();
                let draft = form.begin_submit()?;
                self.form.set(form);

                let outcome = self.repository.create(&draft) $( .$await_ext )?;
                match outcome {
                    Ok(()) => {
                        tracing::info!(name = %draft.name, "merchant created");
                        self.form.update(NewMerchantForm::complete_submit);
                        self.reload() $( .$await_ext )?
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to create merchant");
                        self.form.update(NewMerchantForm::abandon_submit);
                        Err(err)
                    }
                }
            }

            // ── Edit draft ──────────────────────────────────────────

            /// Returns the merchant being edited, if any.
            #[inline]
            #[must_use]
            pub const fn edit_draft(&self) -> Option<&Merchant> {
                self.editing.get().as_ref()
            }

            /// Returns the edit draft cell, for revision tracking.
            #[inline]
            #[must_use]
            pub const fn edit_cell(&self) -> &StateCell<Option<Merchant>> {
                &self.editing
            }

            /// Starts editing a copy of the cached merchant `id`.
            ///
            /// Any draft already open is discarded without confirmation.
            ///
            /// # Errors
            ///
            /// Returns [`MerchantError::NotFound`] if `id` is not cached.
            pub fn open_edit(&mut self, id: MerchantId) -> Result<()> {
                let merchant = self.cached(id)?.clone();
                if let Some(previous) = self.editing.get().as_ref() {
                    tracing::debug!(discarded = %previous.id, "replacing unsaved edit draft");
                }
                self.editing.set(Some(merchant));
                Ok(())
            }

            /// Updates one text field of the edit draft.
            ///
            /// Returns `false` if no draft is open.
            #[inline]
            pub fn set_edit_field<T: Into<String>>(&mut self, field: MerchantField, value: T) -> bool {
                self.with_edit_draft(|draft| draft.set_field(field, value))
            }

            /// Updates the status of the edit draft.
            ///
            /// Returns `false` if no draft is open.
            #[inline]
            pub fn set_edit_status(&mut self, status: MerchantStatus) -> bool {
                self.with_edit_draft(|draft| draft.status = status)
            }

            /// Sends the edit draft as a full replacement of its record.
            ///
            /// On success the draft is closed and the list reloaded. On failure
            /// the draft stays open. Does nothing if no draft is open.
            ///
            /// # Errors
            ///
            /// Returns the repository error if the update is rejected, or the
            /// reload error if the follow-up fetch fails.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn save_edit(&mut self) -> Result<()> {
                let Some(draft) = self.editing.get().clone() else {
                    tracing::debug!("no edit draft to save");
                    return Ok(());
                };

                let outcome = self.repository.update(draft.id, &draft) $( .$await_ext )?;
                match outcome {
                    Ok(()) => {
                        tracing::info!(id = %draft.id, "merchant updated");
                        self.editing.set(None);
                        self.reload() $( .$await_ext )?
                    }
                    Err(err) => {
                        tracing::error!(id = %draft.id, error = %err, "failed to update merchant");
                        Err(err)
                    }
                }
            }

            /// Closes the edit draft without saving.
            #[inline]
            pub fn cancel_edit(&mut self) {
                if self.editing.get().is_some() {
                    self.editing.set(None);
                }
            }

            /// Applies `f` to the open edit draft; `false` if none is open.
            fn with_edit_draft<F: FnOnce(&mut Merchant)>(&mut self, f: F) -> bool {
                if self.editing.get().is_none() {
                    return false;
                }
                self.editing.update(|slot| {
                    if let Some(draft) = slot.as_mut() {
                        f(draft);
                    }
                });
                true
            }

            // ── Delete target ───────────────────────────────────────

            /// Returns the merchant awaiting delete confirmation, if any.
            #[inline]
            #[must_use]
            pub const fn delete_target(&self) -> Option<&Merchant> {
                self.pending_delete.get().as_ref()
            }

            /// Returns the delete target cell, for revision tracking.
            #[inline]
            #[must_use]
            pub const fn delete_cell(&self) -> &StateCell<Option<Merchant>> {
                &self.pending_delete
            }

            /// Marks the cached merchant `id` for deletion, pending
            /// confirmation.
            ///
            /// # Errors
            ///
            /// Returns [`MerchantError::NotFound`] if `id` is not cached.
            pub fn request_delete(&mut self, id: MerchantId) -> Result<()> {
                let merchant = self.cached(id)?.clone();
                self.pending_delete.set(Some(merchant));
                Ok(())
            }

            /// Drops the delete target without contacting the server.
            #[inline]
            pub fn cancel_delete(&mut self) {
                if self.pending_delete.get().is_some() {
                    self.pending_delete.set(None);
                }
            }

            /// Deletes the target, then clears it and reloads the list.
            ///
            /// The outcome of the delete call is only logged: the target is
            /// cleared and the list reloaded either way. Does nothing if no
            /// target is set.
            ///
            /// # Errors
            ///
            /// Returns the reload error if the follow-up fetch fails.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn confirm_delete(&mut self) -> Result<()> {
                let Some(id) = self.pending_delete.get().as_ref().map(|merchant| merchant.id) else {
                    tracing::debug!("no delete target to confirm");
                    return Ok(());
                };

                let outcome = self.repository.remove(id) $( .$await_ext )?;
                match outcome {
                    Ok(()) => tracing::info!(id = %id, "merchant deleted"),
                    Err(err) => tracing::warn!(id = %id, error = %err, "delete failed; refreshing anyway"),
                }
                self.pending_delete.set(None);
                self.reload() $( .$await_ext )?
            }

            /// Looks up a cached merchant or reports it missing.
            fn cached(&self, id: MerchantId) -> Result<&Merchant> {
                self.merchant(id).ok_or(MerchantError::NotFound(id))
            }
        }
    };
}

#[cfg(feature = "async")]
define_dashboard! {
    dashboard_name: Dashboard,
    repository_trait: Repository,
    dashboard_doc: "Async merchant dashboard.\n\nEvery transition takes `&mut self`, so a single task drives the state\nmachine and the cells need no locking.",
    async_kw: async,
    await_kw: await,
}

#[cfg(feature = "blocking")]
define_dashboard! {
    dashboard_name: BlockingDashboard,
    repository_trait: BlockingRepository,
    dashboard_doc: "Blocking (synchronous) merchant dashboard.",
}
