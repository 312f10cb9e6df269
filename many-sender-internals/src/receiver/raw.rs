//! Type-erased receiver container.
//!
//! This module encapsulates the `vtable` and `slot` fields of [`RawReceiver`],
//! ensuring they are only visible within this module. This visibility
//! restriction guarantees the safety invariant: **the vtable always matches the
//! receiver stored in the slot**.
//!
//! Receivers use the same [`Slot`] storage as producers, so small receivers
//! (a handle to shared state, a channel sender, a closure capturing a couple of
//! references) are erased without allocating.

use core::any::TypeId;

use crate::{contracts::Receiver, receiver::vtable::ReceiverVtable, slot::Slot};

/// An owned receiver of values `V` and errors `E`, whose concrete type has been
/// erased.
///
/// Unlike [`RawManySender`](crate::RawManySender) there is no empty state: a
/// `RawReceiver` always holds a receiver until it is dropped.
pub struct RawReceiver<E: 'static, V: 'static> {
    /// The vtable of the stored receiver
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. This is the vtable created for the type of the receiver stored in
    ///    `slot`.
    /// 2. The slot is not empty, except during the execution of the `Drop`
    ///    implementation.
    vtable: &'static ReceiverVtable<E, V>,
    /// The stored receiver
    slot: Slot,
}

impl<E: 'static, V: 'static> RawReceiver<E, V> {
    /// Creates a new [`RawReceiver`] that owns `receiver`.
    #[inline]
    pub fn new<R>(receiver: R) -> Self
    where
        R: Receiver<E, V> + 'static,
    {
        Self {
            // SAFETY:
            // 1. The vtable and the slot are created from the same `R`
            // 2. `Slot::new` never returns an empty slot
            vtable: ReceiverVtable::new::<R>(),
            slot: Slot::new(receiver),
        }
    }

    /// Returns the [`TypeId`] of the stored receiver.
    #[inline]
    pub fn receiver_type_id(&self) -> TypeId {
        self.vtable.type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored receiver.
    #[inline]
    pub fn receiver_type_name(&self) -> &'static str {
        self.vtable.type_name()
    }

    /// Returns `true` if the receiver is stored in the inline buffer rather
    /// than on the heap.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.slot.is_inline()
    }
}

impl<E: 'static, V: 'static> Receiver<E, V> for RawReceiver<E, V> {
    #[inline]
    fn value(&mut self, value: V) {
        // SAFETY:
        // 1. The vtable matches the receiver in the slot (guaranteed by the
        //    invariants on this type)
        unsafe {
            self.vtable.value(&mut self.slot, value);
        }
    }

    #[inline]
    fn error(&mut self, error: E) {
        // SAFETY:
        // 1. The vtable matches the receiver in the slot (guaranteed by the
        //    invariants on this type)
        unsafe {
            self.vtable.error(&mut self.slot, error);
        }
    }

    #[inline]
    fn done(&mut self) {
        // SAFETY:
        // 1. The vtable matches the receiver in the slot (guaranteed by the
        //    invariants on this type)
        unsafe {
            self.vtable.done(&mut self.slot);
        }
    }
}

impl<E: 'static, V: 'static> core::ops::Drop for RawReceiver<E, V> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. The vtable matches the receiver in the slot (guaranteed by the
        //    invariants on this type). We are in the drop function, so the
        //    emptied slot is never used again.
        unsafe {
            self.vtable.drop(&mut self.slot);
        }
    }
}
