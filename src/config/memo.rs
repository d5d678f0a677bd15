//! Load-once cells.

use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::Result;

/// A value that is loaded on first access and then kept.
///
/// The cell starts empty. The first successful
/// [`get_or_try_load`](Self::get_or_try_load) stores its value; every later
/// call returns a reference to that same value without running the loader.
/// A mutex serializes first loads, so concurrent callers never load twice.
/// A failed load leaves the cell empty and is reported to the caller; it is
/// not retried here.
#[derive(Debug)]
pub struct Memoized<T> {
    value: OnceLock<T>,
    init: Mutex<()>,
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Memoized<T> {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The loaded value, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Whether a value has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the stored value, running `load` first if the cell is empty.
    pub fn get_or_try_load<F>(&self, load: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let loaded = load()?;
        Ok(self.value.get_or_init(|| loaded))
    }
}
