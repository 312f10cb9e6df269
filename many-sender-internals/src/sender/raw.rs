//! Type-erased producer container.
//!
//! This module encapsulates the `vtable` and `slot` fields of
//! [`RawManySender`], ensuring they are only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the vtable always
//! matches the producer stored in the slot, or the slot is empty**.
//!
//! # Safety Invariant
//!
//! The fields are only ever set together: by [`RawManySender::new`], which
//! creates both from the same `P`, by [`RawManySender::empty`], and by the
//! transfer in [`RawManySender::take`], which moves the producer and swaps the
//! vtable in one step. Whenever a slot is emptied, the vtable functions of the
//! former producer type still treat the empty slot as a no-op, so a stale vtable
//! next to an empty slot is harmless.
//!
//! # Allocation Strategy
//!
//! Producers for which [`fits_inline`](crate::fits_inline) holds are stored in
//! the inline buffer of the slot and never touch the allocator. Larger or
//! over-aligned producers are boxed once on construction and freed once on
//! destruction. Moving a boxed producer between containers only hands over the
//! pointer.

use core::any::TypeId;

use crate::{contracts::SubmitTo, sender::vtable::SenderVtable, slot::Slot};

/// An owned, type-erased producer that can be submitted to receivers of type
/// `R`.
///
/// The container is either empty or holds one producer of some concrete type
/// `P`, though we do not know which actual `P` it is. An empty container
/// silently drops every receiver submitted to it.
///
/// This type is move-only. Moving it in Rust moves the producer along with it,
/// and [`take`](RawManySender::take) moves the producer out while leaving an
/// empty container behind.
pub struct RawManySender<R: 'static> {
    /// The vtable of the stored producer
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. If `slot` is not empty, this is the vtable created for the type of
    ///    the producer stored in `slot`.
    vtable: &'static SenderVtable<R>,
    /// The stored producer
    slot: Slot,
}

impl<R: 'static> RawManySender<R> {
    /// Creates a container that holds nothing.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            vtable: SenderVtable::empty(),
            slot: Slot::Empty,
        }
    }

    /// Creates a container that owns `producer`.
    ///
    /// The producer is stored inline if
    /// [`fits_inline::<P>()`](crate::fits_inline) holds and boxed otherwise.
    #[inline]
    pub fn new<P>(producer: P) -> Self
    where
        P: SubmitTo<R> + 'static,
    {
        Self {
            // SAFETY:
            // 1. The vtable and the slot are created from the same `P`
            vtable: SenderVtable::new::<P>(),
            slot: Slot::new(producer),
        }
    }

    /// Returns `true` if the container holds no producer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// Returns `true` if the producer is stored in the inline buffer rather
    /// than on the heap.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.slot.is_inline()
    }

    /// Returns the [`TypeId`] of the stored producer, or `None` if the
    /// container is empty.
    #[inline]
    pub fn producer_type_id(&self) -> Option<TypeId> {
        if self.is_empty() {
            None
        } else {
            Some(self.vtable.type_id())
        }
    }

    /// Returns the [`core::any::type_name`] of the stored producer, or `None`
    /// if the container is empty.
    #[inline]
    pub fn producer_type_name(&self) -> Option<&'static str> {
        if self.is_empty() {
            None
        } else {
            Some(self.vtable.type_name())
        }
    }

    /// Moves the producer into a new container and leaves `self` empty.
    ///
    /// No allocation happens: inline producers are moved between buffers and
    /// boxed producers are moved by handing over the pointer.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut destination = Self::empty();

        // SAFETY:
        // 1. `self.vtable` matches the producer in `self.slot`, or the slot is
        //    empty (guaranteed by the invariants on this type)
        // 2. `destination.slot` was just created empty
        unsafe {
            self.vtable
                .transfer_or_destroy(&mut self.slot, Some(&mut destination.slot));
        }

        // SAFETY:
        // 1. The producer now lives in `destination.slot`, so the vtables are
        //    swapped along with it. `self.slot` is empty and receives the empty
        //    vtable.
        core::mem::swap(&mut self.vtable, &mut destination.vtable);

        destination
    }

    /// Drops the stored producer, if any, and leaves the container empty.
    #[inline]
    pub fn clear(&mut self) {
        // SAFETY:
        // 1. `self.vtable` matches the producer in `self.slot`, or the slot is
        //    empty (guaranteed by the invariants on this type)
        // 2. There is no destination
        unsafe {
            self.vtable.transfer_or_destroy(&mut self.slot, None);
        }

        // SAFETY:
        // 1. The slot is empty now
        self.vtable = SenderVtable::empty();
    }

    /// Drops the stored producer, then moves the producer of `source` into
    /// `self`, leaving `source` empty.
    #[inline]
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear();
        *self = source.take();
    }

    /// Submits `receiver` to the stored producer.
    ///
    /// If the container is empty, the receiver is dropped without being
    /// signalled.
    #[inline]
    pub fn submit(&mut self, receiver: R) {
        // SAFETY:
        // 1. `self.vtable` matches the producer in `self.slot`, or the slot is
        //    empty (guaranteed by the invariants on this type)
        unsafe {
            self.vtable.submit_to(&mut self.slot, receiver);
        }
    }
}

impl<R: 'static> Default for RawManySender<R> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: 'static> SubmitTo<R> for RawManySender<R> {
    #[inline]
    fn submit(&mut self, receiver: R) {
        RawManySender::submit(self, receiver);
    }
}

impl<R: 'static> core::ops::Drop for RawManySender<R> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. `self.vtable` matches the producer in `self.slot`, or the slot is
        //    empty (guaranteed by the invariants on this type)
        // 2. There is no destination
        unsafe {
            self.vtable.transfer_or_destroy(&mut self.slot, None);
        }
    }
}
