//! The host's lock: `std::sync::Mutex` with `std`, `spin::Mutex` without.
//!
//! Locks are only ever held for the closure passed to [`Mutex::with`], so no
//! guard can outlive a table operation.

#[cfg(feature = "std")]
type Inner<T> = std::sync::Mutex<T>;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
type Inner<T> = spin::Mutex<T>;

pub struct Mutex<T>(Inner<T>);

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(Inner::new(value))
    }

    /// Runs `f` with exclusive access to the value.
    ///
    /// A lock poisoned by a panicking holder is taken over as is.
    #[cfg(feature = "std")]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    /// Runs `f` with exclusive access to the value.
    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.lock())
    }
}
