//! Vtable for type-erased receiver operations.
//!
//! This module encapsulates the fields of [`ReceiverVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameter must match the actual receiver type
//! stored in the [`Slot`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`ReceiverVtable::new`], which pairs the function pointers
//! with a specific receiver type `R` at compile time.

use core::any::TypeId;

use crate::{contracts::Receiver, slot::Slot};

/// Vtable for type-erased receiver operations.
///
/// # Safety Invariant
///
/// The fields `drop`, `value`, `error` and `done` are guaranteed to point to
/// the functions defined below instantiated with the receiver type `R` that
/// was used to create this [`ReceiverVtable`].
pub(crate) struct ReceiverVtable<E, V> {
    /// Gets the [`TypeId`] of the receiver type that was used to create this
    /// [`ReceiverVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the receiver type that was used to
    /// create this [`ReceiverVtable`].
    type_name: fn() -> &'static str,
    /// Drops the receiver stored in the slot.
    drop: unsafe fn(&mut Slot),
    /// Delivers a value to the receiver.
    value: unsafe fn(&mut Slot, V),
    /// Delivers the terminal error to the receiver.
    error: unsafe fn(&mut Slot, E),
    /// Delivers the terminal completion to the receiver.
    done: unsafe fn(&mut Slot),
}

impl<E: 'static, V: 'static> ReceiverVtable<E, V> {
    /// Creates a new [`ReceiverVtable`] for the receiver type `R`.
    pub(super) const fn new<R>() -> &'static Self
    where
        R: Receiver<E, V> + 'static,
    {
        const {
            &Self {
                type_id: TypeId::of::<R>,
                type_name: core::any::type_name::<R>,
                drop: drop::<R>,
                value: value::<R, E, V>,
                error: error::<R, E, V>,
                done: done::<R, E, V>,
            }
        }
    }

    /// Gets the [`TypeId`] of the receiver type that was used to create this
    /// [`ReceiverVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the receiver type that was used to
    /// create this [`ReceiverVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Drops the receiver stored in `slot` and leaves the slot empty.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ReceiverVtable`] must be a vtable for the receiver type
    ///    stored in `slot`, or `slot` must be empty.
    #[inline]
    pub(super) unsafe fn drop(&self, slot: &mut Slot) {
        // SAFETY: We know that `self.drop` points to the function `drop::<R>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe {
            (self.drop)(slot);
        }
    }

    /// Delivers `value` to the receiver stored in `slot`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ReceiverVtable`] must be a vtable for the receiver type
    ///    stored in `slot`, or `slot` must be empty.
    #[inline]
    pub(super) unsafe fn value(&self, slot: &mut Slot, value: V) {
        // SAFETY: We know that `self.value` points to the function
        // `value::<R, E, V>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        unsafe {
            (self.value)(slot, value);
        }
    }

    /// Delivers `error` to the receiver stored in `slot`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ReceiverVtable`] must be a vtable for the receiver type
    ///    stored in `slot`, or `slot` must be empty.
    #[inline]
    pub(super) unsafe fn error(&self, slot: &mut Slot, error: E) {
        // SAFETY: We know that `self.error` points to the function
        // `error::<R, E, V>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        unsafe {
            (self.error)(slot, error);
        }
    }

    /// Delivers the terminal completion to the receiver stored in `slot`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ReceiverVtable`] must be a vtable for the receiver type
    ///    stored in `slot`, or `slot` must be empty.
    #[inline]
    pub(super) unsafe fn done(&self, slot: &mut Slot) {
        // SAFETY: We know that `self.done` points to the function
        // `done::<R, E, V>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        unsafe {
            (self.done)(slot);
        }
    }
}

/// Drops the receiver stored in `slot`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` holds an `R` or is empty.
unsafe fn drop<R: 'static>(slot: &mut Slot) {
    // SAFETY:
    // 1. Guaranteed by the caller
    unsafe {
        slot.destroy::<R>();
    }
}

/// Delivers a value to the receiver stored in `slot`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` holds an `R` or is empty.
unsafe fn value<R, E, V>(slot: &mut Slot, value: V)
where
    R: Receiver<E, V> + 'static,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    let receiver: Option<&mut R> = unsafe { slot.get_mut::<R>() };
    if let Some(receiver) = receiver {
        receiver.value(value);
    }
}

/// Delivers the terminal error to the receiver stored in `slot`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` holds an `R` or is empty.
unsafe fn error<R, E, V>(slot: &mut Slot, error: E)
where
    R: Receiver<E, V> + 'static,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    let receiver: Option<&mut R> = unsafe { slot.get_mut::<R>() };
    if let Some(receiver) = receiver {
        receiver.error(error);
    }
}

/// Delivers the terminal completion to the receiver stored in `slot`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` holds an `R` or is empty.
unsafe fn done<R, E, V>(slot: &mut Slot)
where
    R: Receiver<E, V> + 'static,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    let receiver: Option<&mut R> = unsafe { slot.get_mut::<R>() };
    if let Some(receiver) = receiver {
        receiver.done();
    }
}
