//! New-merchant form state.
//!
//! The form is independent of the edit draft and the delete target: it
//! starts blank, collects field changes, and is only reset once the server
//! has accepted the submission.

use crate::error::{MerchantError, Result};
use crate::models::{MerchantField, MerchantStatus, NewMerchant};

/// Phase of the new-merchant form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormPhase {
    /// Every field holds its initial value.
    Empty,
    /// At least one field was changed.
    Filled,
    /// A create request is in flight.
    Submitting,
}

/// Buffer behind the "add merchant" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMerchantForm {
    /// Values entered so far.
    draft: NewMerchant,
    /// Whether a create request is in flight.
    submitting: bool,
}

impl NewMerchantForm {
    /// Creates a blank form with status `Pending`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the values entered so far.
    #[inline]
    #[must_use]
    pub const fn draft(&self) -> &NewMerchant {
        &self.draft
    }

    /// Returns the current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else if self.draft.is_blank() {
            FormPhase::Empty
        } else {
            FormPhase::Filled
        }
    }

    /// Updates a single text field.
    #[inline]
    pub fn set_field<T: Into<String>>(&mut self, field: MerchantField, value: T) {
        self.draft.set_field(field, value);
    }

    /// Updates the status.
    #[inline]
    pub fn set_status(&mut self, status: MerchantStatus) {
        self.draft.status = status;
    }

    /// Checks required fields and enters [`FormPhase::Submitting`].
    ///
    /// Returns a copy of the payload to send. The entered values stay in the
    /// form until [`Self::complete_submit`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::MissingField`] naming the first empty
    /// required field; the form is left untouched.
    pub fn begin_submit(&mut self) -> Result<NewMerchant> {
        if let Some(&field) = self.draft.missing_fields().first() {
            return Err(MerchantError::MissingField(field));
        }
        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// The server accepted the submission: back to a blank form.
    #[inline]
    pub fn complete_submit(&mut self) {
        *self = Self::default();
    }

    /// The submission failed: keep the entered values, leave the
    /// submitting phase.
    #[inline]
    pub const fn abandon_submit(&mut self) {
        self.submitting = false;
    }
}
