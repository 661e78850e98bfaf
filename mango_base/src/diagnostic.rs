//! A module for handling diagnostics reported while processing the source code.

use std::{
    cell::Cell,
    fmt::Display,
    sync::{PoisonError, RwLock, RwLockReadGuard},
};

/// Represents a trait responsible for handling diagnostics.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in a vector.
#[derive(Debug)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: RwLock::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector of diagnostics.
    pub fn into_vec(self) -> Vec<T> {
        self.diagnostics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a reference to the underlying vector of diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.diagnostics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) {
        self.diagnostics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.into());
    }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}
}

/// Is a struct that implements [`Handler`] trait by counting the number of diagnostics received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: Cell<usize>,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.get() }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.counter.set(0) }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) { self.counter.set(self.counter.get() + 1) }
}

/// Is a struct that implements [`Handler`] trait by printing every diagnostic to the standard
/// error stream.
#[derive(Debug, Default)]
pub struct Printer {
    printed: Cell<bool>,
}

impl Printer {
    /// Creates a new [`Printer`] that has not printed anything yet.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns `true` if at least one diagnostic has been printed.
    #[must_use]
    pub fn has_printed(&self) -> bool { self.printed.get() }
}

impl<T: Display> Handler<T> for Printer {
    fn receive(&self, diagnostic: T) {
        eprintln!("{diagnostic}");
        self.printed.set(true);
    }
}
