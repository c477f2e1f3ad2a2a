//! Observable state cells.
//!
//! A [`StateCell`] pairs a value with a revision counter that is bumped on
//! every write. Presentation code keeps the last revision it rendered and
//! re-reads the cell when the counter has moved.

/// A value plus a write counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateCell<T> {
    /// Current value.
    value: T,
    /// Number of writes since construction (wrapping).
    revision: u64,
}

impl<T> StateCell<T> {
    /// Creates a cell at revision zero.
    #[inline]
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value, revision: 0 }
    }

    /// Returns the current value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Returns the number of writes so far.
    #[inline]
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if the cell was written after `revision` was observed.
    #[inline]
    #[must_use]
    pub const fn changed_since(&self, revision: u64) -> bool {
        self.revision != revision
    }

    /// Replaces the value.
    #[inline]
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.bump();
    }

    /// Mutates the value in place.
    #[inline]
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.bump();
        result
    }

    /// Advances the revision counter.
    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T: Default> StateCell<T> {
    /// Takes the value out, leaving the default in its place.
    #[inline]
    pub fn take(&mut self) -> T {
        self.bump();
        core::mem::take(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_at_revision_zero() {
        let cell = StateCell::new(5_i32);
        assert_eq!(*cell.get(), 5);
        assert_eq!(cell.revision(), 0);
    }

    #[test]
    fn every_write_bumps_revision() {
        let mut cell = StateCell::new(Vec::<i32>::new());
        cell.set(vec![1]);
        cell.update(|v| v.push(2));
        assert_eq!(cell.get(), &vec![1, 2]);
        assert_eq!(cell.revision(), 2);
    }

    #[test]
    fn take_leaves_default_and_bumps() {
        let mut cell = StateCell::new(Some("draft"));
        let seen = cell.revision();
        assert_eq!(cell.take(), Some("draft"));
        assert_eq!(*cell.get(), None);
        assert!(cell.changed_since(seen));
    }

    #[test]
    fn unchanged_cell_reports_no_change() {
        let cell = StateCell::new(1_u8);
        assert!(!cell.changed_since(cell.revision()));
    }
}
