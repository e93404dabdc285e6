//! Checked, revocable references to shared resources.
//!
//! A [`Capability`] is a typed reference that stops working once the
//! issuing party drops its handle. Custodians hold capabilities to a
//! grantor's restricted view; the owner retains the only strong handle,
//! so dropping the owner handle invalidates every outstanding capability
//! at once.

use std::sync::{Arc, Weak};

use crate::error::{Result, WardenError};

/// A checked reference to a value of type `T`.
///
/// Cloning a capability does not extend the target's lifetime; all clones
/// die together when the issuer's handle is dropped.
#[derive(Debug)]
pub struct Capability<T> {
    target: Weak<T>,
}

impl<T> Capability<T> {
    /// Issue a capability to the given shared target.
    pub(crate) fn new(target: &Arc<T>) -> Self {
        Self {
            target: Arc::downgrade(target),
        }
    }

    /// Whether the capability still resolves to a live target.
    pub fn check(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Resolve the capability, failing if it has been invalidated.
    pub fn borrow(&self) -> Result<Arc<T>> {
        self.target
            .upgrade()
            .ok_or_else(|| WardenError::Access("capability target no longer exists".into()))
    }
}

impl<T> Clone for Capability<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}
