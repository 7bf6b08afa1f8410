//! Exclusive and shared ownership holders, plus a weak observer.
//!
//! [`ExclusiveHolder`] owns at most one value and can be emptied, refilled and
//! moved. [`SharedHolder`] lets several co-owners keep one value alive through a
//! reference count, and [`WeakObserver`] watches that value without extending
//! its lifetime.
//!
//! Accessing an empty holder is a checked failure ([`IdiomError::EmptyHolder`]),
//! never undefined behaviour.
//!
//! # Threading
//!
//! The shared holder is built on [`Rc`], so it never crosses threads and a
//! promotion through [`WeakObserver::lock`] cannot race with the last holder
//! being released. A thread-safe variant must promote in one atomic step (what
//! `std::sync::Weak::upgrade` does). Checking [`WeakObserver::expired`] and then
//! promoting is a race there, because the value can be released in between.

use crate::error::{IdiomError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

/// A construction or destruction of a [`Tracked`] value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Created(i32),
    Destroyed(i32),
}

/// Append-only record of [`Lifecycle`] events, shared by every clone.
#[derive(Clone, Debug, Default)]
pub struct LifecycleLog {
    events: Rc<RefCell<Vec<Lifecycle>>>,
}

impl LifecycleLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: Lifecycle) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of all events recorded so far, oldest first.
    pub fn events(&self) -> Vec<Lifecycle> {
        self.events.borrow().clone()
    }

    /// How many times a value tagged `value` has been destroyed.
    pub fn destroyed(&self, value: i32) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| **e == Lifecycle::Destroyed(value))
            .count()
    }

    /// Number of tracked values created but not yet destroyed.
    pub fn live(&self) -> usize {
        self.events.borrow().iter().fold(0usize, |n, e| match e {
            Lifecycle::Created(_) => n + 1,
            Lifecycle::Destroyed(_) => n.saturating_sub(1),
        })
    }
}

/// An integer that announces its construction and destruction.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    log: LifecycleLog,
}

impl Tracked {
    pub fn new(value: i32, log: &LifecycleLog) -> Self {
        info!(value, "Demo({value}) created");
        log.record(Lifecycle::Created(value));
        Self {
            value,
            log: log.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        info!(value = self.value, "Demo({}) destroyed", self.value);
        self.log.record(Lifecycle::Destroyed(self.value));
    }
}

/// Owns at most one value; ownership moves, it is never shared.
///
/// The holder is deliberately not `Clone`, so copying one is rejected at
/// compile time:
///
/// ```compile_fail
/// use robot_idioms::ExclusiveHolder;
///
/// let first = ExclusiveHolder::new(1);
/// let second: ExclusiveHolder<i32> = first.clone();
/// ```
///
/// Moving the value out with [`transfer`](Self::transfer) leaves the source
/// empty but usable:
///
/// ```
/// use robot_idioms::ExclusiveHolder;
///
/// let mut first = ExclusiveHolder::new(1);
/// let second = first.transfer();
/// assert!(first.is_empty());
/// assert_eq!(second.get().copied(), Ok(1));
/// ```
#[derive(Debug)]
pub struct ExclusiveHolder<T> {
    slot: Option<Box<T>>,
}

impl<T> Default for ExclusiveHolder<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ExclusiveHolder<T> {
    /// A holder that owns nothing yet.
    pub fn empty() -> Self {
        Self { slot: None }
    }

    pub fn new(value: T) -> Self {
        Self {
            slot: Some(Box::new(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn get(&self) -> Result<&T> {
        self.slot.as_deref().ok_or(IdiomError::EmptyHolder)
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.slot.as_deref_mut().ok_or(IdiomError::EmptyHolder)
    }

    /// Moves the owned value into a new holder, leaving `self` empty.
    ///
    /// The value's heap allocation moves with it; nothing is copied.
    pub fn transfer(&mut self) -> Self {
        debug!(was_empty = self.is_empty(), "transferring exclusive ownership");
        Self {
            slot: self.slot.take(),
        }
    }

    /// Installs `value`, releasing whatever was held before.
    pub fn replace(&mut self, value: T) {
        let previous = mem::replace(&mut self.slot, Some(Box::new(value)));
        drop(previous);
    }

    /// Releases the held value now. Resetting an empty holder does nothing.
    pub fn reset(&mut self) {
        self.slot = None;
    }

    pub fn into_inner(self) -> Result<T> {
        self.slot.map(|b| *b).ok_or(IdiomError::EmptyHolder)
    }
}

/// A reference-counted co-owner of a value.
///
/// Cloning shares the value and bumps the count; dropping or
/// [`reset`](Self::reset)ting a clone gives its share back. The value is
/// released when the count reaches zero.
#[derive(Debug)]
pub struct SharedHolder<T> {
    slot: Option<Rc<T>>,
}

impl<T> Clone for SharedHolder<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> Default for SharedHolder<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> SharedHolder<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Some(Rc::new(value)),
        }
    }

    pub fn empty() -> Self {
        Self { slot: None }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Number of live holders sharing this value; 0 for an empty holder.
    pub fn use_count(&self) -> usize {
        self.slot.as_ref().map_or(0, Rc::strong_count)
    }

    pub fn get(&self) -> Result<&T> {
        self.slot.as_deref().ok_or(IdiomError::EmptyHolder)
    }

    /// Gives up this holder's share. The value is released if it was the last.
    pub fn reset(&mut self) {
        if let Some(rc) = self.slot.take() {
            debug!(remaining = Rc::strong_count(&rc) - 1, "shared holder reset");
        }
    }

    /// True when both holders point at the same value.
    pub fn shares_with(&self, other: &Self) -> bool {
        match (&self.slot, &other.slot) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// A non-owning observer of the held value.
    ///
    /// Observing an empty holder yields an observer that is already expired.
    pub fn downgrade(&self) -> WeakObserver<T> {
        WeakObserver {
            target: self.slot.as_ref().map_or_else(Weak::new, Rc::downgrade),
        }
    }
}

/// Watches a [`SharedHolder`]'s value without keeping it alive.
#[derive(Debug)]
pub struct WeakObserver<T> {
    target: Weak<T>,
}

impl<T> Clone for WeakObserver<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<T> Default for WeakObserver<T> {
    fn default() -> Self {
        Self {
            target: Weak::new(),
        }
    }
}

impl<T> WeakObserver<T> {
    /// True once every strong holder is gone.
    pub fn expired(&self) -> bool {
        self.target.strong_count() == 0
    }

    /// Strong holders currently sharing the observed value.
    pub fn use_count(&self) -> usize {
        self.target.strong_count()
    }

    /// Promotes to a temporary strong holder, or `None` if the value is gone.
    pub fn lock(&self) -> Option<SharedHolder<T>> {
        self.target.upgrade().map(|rc| SharedHolder { slot: Some(rc) })
    }

    pub fn try_lock(&self) -> Result<SharedHolder<T>> {
        self.lock().ok_or(IdiomError::Expired)
    }
}
