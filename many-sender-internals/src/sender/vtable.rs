//! Vtable for type-erased producer operations.
//!
//! This module contains the [`SenderVtable`] which enables moving, dropping
//! and submitting to a producer whose concrete type `P` has been erased. The
//! vtable stores function pointers that dispatch to the correct typed
//! implementations.
//!
//! This module encapsulates the fields of [`SenderVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameter must match the actual producer type
//! stored in the [`Slot`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`SenderVtable::new`], which pairs the function pointers with
//! a specific producer type `P` at compile time, or via
//! [`SenderVtable::empty`], whose function pointers never touch the slot.

use core::any::TypeId;

use crate::{contracts::SubmitTo, slot::Slot, util::Erased};

/// Vtable for type-erased producer operations.
///
/// Contains function pointers for performing operations on producers without
/// knowing their concrete type at compile time. The receiver type `R` is not
/// erased: it is the type every erased producer is submitted to.
///
/// # Safety Invariant
///
/// The fields `transfer_or_destroy` and `submit_to` are guaranteed to point to
/// the functions defined below instantiated with the producer type `P` that
/// was used to create this [`SenderVtable`], or to the empty functions if it
/// was created by [`SenderVtable::empty`].
pub(crate) struct SenderVtable<R> {
    /// Gets the [`TypeId`] of the producer type that was used to create this
    /// [`SenderVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the producer type that was used to
    /// create this [`SenderVtable`].
    type_name: fn() -> &'static str,
    /// Moves the producer into the destination slot, or drops it if there is
    /// no destination.
    transfer_or_destroy: unsafe fn(&mut Slot, Option<&mut Slot>),
    /// Submits the receiver to the producer.
    submit_to: unsafe fn(&mut Slot, R),
}

impl<R: 'static> SenderVtable<R> {
    /// Creates a new [`SenderVtable`] for the producer type `P`.
    pub(super) const fn new<P>() -> &'static Self
    where
        P: SubmitTo<R> + 'static,
    {
        const {
            &Self {
                type_id: TypeId::of::<P>,
                type_name: core::any::type_name::<P>,
                transfer_or_destroy: transfer_or_destroy::<P>,
                submit_to: submit_to::<P, R>,
            }
        }
    }

    /// Returns the vtable of a sender that holds nothing.
    ///
    /// Transferring or destroying does nothing, and submitting drops the
    /// receiver.
    pub(super) const fn empty() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<Erased>,
                type_name: core::any::type_name::<Erased>,
                transfer_or_destroy: empty_transfer_or_destroy,
                submit_to: empty_submit_to::<R>,
            }
        }
    }

    /// Gets the [`TypeId`] of the producer type that was used to create this
    /// [`SenderVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the producer type that was used to
    /// create this [`SenderVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Moves the producer stored in `source` into `destination`, or drops it
    /// when `destination` is `None`. Either way `source` is left empty.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`SenderVtable`] must be a vtable for the producer type stored
    ///    in `source`, or `source` must be empty.
    /// 2. `destination`, if present, must be empty.
    #[inline]
    pub(super) unsafe fn transfer_or_destroy(
        &self,
        source: &mut Slot,
        destination: Option<&mut Slot>,
    ) {
        // SAFETY: We know that `self.transfer_or_destroy` points to either the
        // function `transfer_or_destroy::<P>` or `empty_transfer_or_destroy`
        // below. Their safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe {
            (self.transfer_or_destroy)(source, destination);
        }
    }

    /// Submits `receiver` to the producer stored in `slot`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`SenderVtable`] must be a vtable for the producer type stored
    ///    in `slot`, or `slot` must be empty.
    #[inline]
    pub(super) unsafe fn submit_to(&self, slot: &mut Slot, receiver: R) {
        // SAFETY: We know that `self.submit_to` points to either the function
        // `submit_to::<P, R>` or `empty_submit_to::<R>` below. Their safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe {
            (self.submit_to)(slot, receiver);
        }
    }
}

/// Moves the producer out of `source`, into `destination` if present and into
/// its destructor otherwise.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `source` holds a `P` or is empty.
/// 2. `destination`, if present, is empty.
unsafe fn transfer_or_destroy<P: 'static>(source: &mut Slot, destination: Option<&mut Slot>) {
    match destination {
        // SAFETY:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        Some(destination) => unsafe { source.transfer::<P>(destination) },
        // SAFETY:
        // 1. Guaranteed by the caller
        None => unsafe { source.destroy::<P>() },
    }
}

/// Submits the receiver to the producer stored in `slot`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` holds a `P` or is empty.
unsafe fn submit_to<P, R>(slot: &mut Slot, receiver: R)
where
    P: SubmitTo<R> + 'static,
{
    // SAFETY:
    // 1. Guaranteed by the caller
    let producer: Option<&mut P> = unsafe { slot.get_mut::<P>() };
    if let Some(producer) = producer {
        producer.submit(receiver);
    }
}

/// Transfer-or-destroy of the empty vtable. There is nothing to move or drop.
///
/// # Safety
///
/// Always safe to call. It is `unsafe` only to match the vtable signature.
unsafe fn empty_transfer_or_destroy(_source: &mut Slot, _destination: Option<&mut Slot>) {}

/// Submission of the empty vtable. The receiver is dropped without being
/// signalled.
///
/// # Safety
///
/// Always safe to call. It is `unsafe` only to match the vtable signature.
unsafe fn empty_submit_to<R>(_slot: &mut Slot, receiver: R) {
    core::mem::drop(receiver);
}
