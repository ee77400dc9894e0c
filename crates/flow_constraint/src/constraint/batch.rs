//! Scoped batching of constraint mutations.

use core::ops::{Deref, DerefMut};

use log::debug;

use super::FlowConstraint;
use crate::proxy::LayoutProxy;

/// RAII guard holding one lock on a [`FlowConstraint`].
///
/// Mutations made through the guard only accumulate. Dropping the guard releases
/// its lock, and when that was the last lock exactly one layout pass runs.
pub struct BatchGuard<'constraint, P: LayoutProxy> {
    constraint: &'constraint mut FlowConstraint<P>,
}

impl<'constraint, P: LayoutProxy> BatchGuard<'constraint, P> {
    pub(super) fn acquire(constraint: &'constraint mut FlowConstraint<P>) -> Self {
        constraint.lock();
        Self { constraint }
    }
}

impl<P: LayoutProxy> Deref for BatchGuard<'_, P> {
    type Target = FlowConstraint<P>;

    fn deref(&self) -> &Self::Target {
        self.constraint
    }
}

impl<P: LayoutProxy> DerefMut for BatchGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.constraint
    }
}

impl<P: LayoutProxy> Drop for BatchGuard<'_, P> {
    fn drop(&mut self) {
        self.constraint.unlock();
        if self.constraint.is_locked() {
            debug!(target: "flow::constraint", "batch released, outer lock still held");
        } else {
            self.constraint.update_layout();
        }
    }
}
