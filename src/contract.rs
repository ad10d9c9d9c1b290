//! Kernel contract support: precondition violations and the debug-only
//! operation guard.
//!
//! A violated precondition is a caller defect. Kernel methods check their
//! preconditions in every build profile and panic through [`violated`], so
//! the message always starts with `map contract violated`.
//!
//! The guard catches a different defect: user `Hash`/`Eq` code calling back
//! into the same map while the bucket store is mid-operation. Debug builds
//! panic naming both operations; release builds compile it to nothing.

use core::cell::Cell;
use thiserror::Error;

/// The one error category of the kernel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    #[error("key is already present")]
    DuplicateKey,
    #[error("key is not present")]
    MissingKey,
    #[error("map is empty")]
    Empty,
}

/// Abort the current kernel operation `op` with `v`.
#[cold]
#[track_caller]
pub(crate) fn violated(op: &'static str, v: Violation) -> ! {
    panic!("map contract violated in `{op}`: {v}")
}

/// Check `ok`, failing the operation with `v` otherwise.
#[inline]
#[track_caller]
pub(crate) fn require(ok: bool, op: &'static str, v: Violation) {
    if !ok {
        violated(op, v);
    }
}

/// Per-map tracker of the operation currently touching the store.
#[derive(Debug)]
pub(crate) struct OperationGuard {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    #[cfg(not(debug_assertions))]
    _unsync: core::marker::PhantomData<Cell<()>>,
}

impl OperationGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            #[cfg(not(debug_assertions))]
            _unsync: core::marker::PhantomData,
        }
    }

    /// Mark `op` as in progress until the returned value drops.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> Operation<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!("map re-entered by `{op}` while `{outer}` was in progress");
            }
            self.active.set(Some(op));
            Operation { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            Operation {
                _owner: core::marker::PhantomData,
            }
        }
    }
}

impl Default for OperationGuard {
    fn default() -> Self {
        Self::new()
    }
}

// A cloned map starts with no operation in flight.
impl Clone for OperationGuard {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// RAII marker returned by [`OperationGuard::enter`].
pub(crate) struct Operation<'a> {
    #[cfg(debug_assertions)]
    owner: &'a OperationGuard,
    #[cfg(not(debug_assertions))]
    _owner: core::marker::PhantomData<&'a OperationGuard>,
}

impl Drop for Operation<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}
