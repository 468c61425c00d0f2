//! Per-instance memoization for expensive manager accessors
//!
//! A [`Memo`] is computed at most once and never invalidated. Errors are not
//! cached: a failed computation leaves the cell empty so the caller sees the
//! failure instead of a silently empty value.

use std::sync::OnceLock;

#[derive(Debug)]
pub struct Memo<T> {
    cell: OnceLock<T>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the cached value, computing it on first access.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let value = init()?;
        // A concurrent writer may have won the race; its value is kept
        Ok(self.cell.get_or_init(|| value))
    }

    pub fn get_or_init<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(init)
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}
