//! Size-bounded storage for a single type-erased value.
//!
//! A [`Slot`] holds at most one value whose concrete type is not recorded in
//! the slot itself. Small values are written directly into an [`InlineBuffer`];
//! everything else is moved into a [`Box`] and only the owning pointer is
//! kept. The active strategy is explicit in the enum variant.
//!
//! # Safety Invariant
//!
//! Every typed operation on a slot is `unsafe` and takes the stored type `T`
//! as a type parameter. Callers must pass the same `T` the slot was created
//! with. The raw sender and receiver types guarantee this by storing a vtable
//! created from the same `T` right next to the slot, and by never exposing the
//! slot outside their own module.
//!
//! Moving a `Slot` moves the stored value: Rust values are always relocatable
//! by a plain byte copy, and [`MaybeUninit`] copies preserve both the bytes and
//! the pointer provenance of the value written into the buffer.

use alloc::boxed::Box;
use core::{mem::MaybeUninit, ptr::NonNull};

use crate::util::Erased;

/// Number of machine words in an [`InlineBuffer`].
const INLINE_WORDS: usize = 3;

/// Number of bytes a value may occupy to be stored inline instead of on the
/// heap.
///
/// Three machine words: enough for a `Vec`, a `String`, a boxed trait object
/// plus a counter, or a closure capturing a few references.
pub const INLINE_CAPACITY: usize = INLINE_WORDS * core::mem::size_of::<usize>();

/// Largest alignment a value may require to be stored inline.
pub const INLINE_ALIGN: usize = core::mem::align_of::<usize>();

/// Returns whether a value of type `T` is stored inline rather than on the
/// heap.
///
/// The decision depends only on the size and alignment of `T`. Moving a Rust
/// value can never fail, so no other property is consulted.
///
/// # Examples
///
/// ```
/// use many_sender_internals::fits_inline;
///
/// assert!(fits_inline::<u64>());
/// assert!(fits_inline::<Vec<u8>>());
/// assert!(!fits_inline::<[u64; 16]>());
/// ```
#[inline]
#[must_use]
pub const fn fits_inline<T>() -> bool {
    core::mem::size_of::<T>() <= INLINE_CAPACITY && core::mem::align_of::<T>() <= INLINE_ALIGN
}

/// Uninitialized, word-aligned bytes large enough for any `T` where
/// [`fits_inline::<T>()`](fits_inline) holds.
#[repr(C)]
pub(crate) struct InlineBuffer {
    /// The raw storage. Words rather than bytes so that the buffer is aligned
    /// to [`INLINE_ALIGN`].
    words: [MaybeUninit<usize>; INLINE_WORDS],
}

impl InlineBuffer {
    /// Creates a buffer with uninitialized contents.
    #[inline]
    const fn uninit() -> Self {
        Self {
            words: [MaybeUninit::uninit(); INLINE_WORDS],
        }
    }

    /// Returns a pointer to the start of the buffer.
    #[inline]
    fn as_ptr(&self) -> *const Erased {
        self.words.as_ptr().cast::<Erased>()
    }

    /// Returns a mutable pointer to the start of the buffer.
    #[inline]
    fn as_mut_ptr(&mut self) -> *mut Erased {
        self.words.as_mut_ptr().cast::<Erased>()
    }
}

/// Storage for at most one value of an erased type.
///
/// `Slot` has no [`Drop`] implementation, since it cannot know how to
/// drop what it holds. Whoever owns the slot must call [`Slot::destroy`] with
/// the right type.
pub(crate) enum Slot {
    /// Holds nothing.
    Empty,
    /// Holds a value written directly into the buffer.
    Inline(InlineBuffer),
    /// Holds a pointer created by [`Box::into_raw`].
    Heap(NonNull<Erased>),
}

impl Slot {
    /// Stores `value`, inline if [`fits_inline::<T>()`](fits_inline) holds and
    /// on the heap otherwise.
    #[inline]
    pub(crate) fn new<T: 'static>(value: T) -> Self {
        if fits_inline::<T>() {
            // SAFETY:
            // 1. We just checked that `T` fits inline
            unsafe { Self::inline_unchecked(value) }
        } else {
            let ptr: *mut T = Box::into_raw(Box::new(value));
            let ptr: *mut Erased = ptr.cast::<Erased>();

            // SAFETY: `Box::into_raw` returns a non-null pointer
            let ptr: NonNull<Erased> = unsafe { NonNull::new_unchecked(ptr) };

            Self::Heap(ptr)
        }
    }

    /// Writes `value` into a fresh [`InlineBuffer`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. [`fits_inline::<T>()`](fits_inline) holds.
    #[inline]
    unsafe fn inline_unchecked<T: 'static>(value: T) -> Self {
        debug_assert!(fits_inline::<T>());

        let mut buffer = InlineBuffer::uninit();
        let ptr: *mut T = buffer.as_mut_ptr().cast::<T>();

        // SAFETY:
        // 1. The buffer is large enough and sufficiently aligned for a `T`, as
        //    guaranteed by the caller.
        // 2. The buffer was just created, so nothing is overwritten.
        unsafe {
            ptr.write(value);
        }

        Self::Inline(buffer)
    }

    /// Returns `true` if the slot holds nothing.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if the slot holds a value in its inline buffer.
    #[inline]
    pub(crate) fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }

    /// Returns a mutable reference to the stored value, or `None` if the slot
    /// is empty.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. If the slot is not empty, it holds a `T`.
    #[inline]
    pub(crate) unsafe fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        match self {
            Self::Empty => None,
            Self::Inline(buffer) => {
                let ptr: *mut T = buffer.as_mut_ptr().cast::<T>();
                // SAFETY:
                // 1. The buffer holds an initialized `T` (guaranteed by the caller)
                // 2. The buffer was sized and aligned for `T` when the value was written
                // 3. The returned reference borrows `self` mutably, so it is unique
                let value: &mut T = unsafe { &mut *ptr };
                Some(value)
            }
            Self::Heap(ptr) => {
                let mut ptr: NonNull<T> = ptr.cast::<T>();
                // SAFETY:
                // 1. The pointer came from `Box::<T>::into_raw` (guaranteed by the caller)
                //    and the box has not been freed, since the slot still owns it
                // 2. The returned reference borrows `self` mutably, so it is unique
                let value: &mut T = unsafe { ptr.as_mut() };
                Some(value)
            }
        }
    }

    /// Drops the stored value and leaves the slot empty.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. If the slot is not empty, it holds a `T`.
    #[inline]
    pub(crate) unsafe fn destroy<T: 'static>(&mut self) {
        // The slot is reset before the value is dropped, so a panicking `Drop`
        // impl cannot cause a second drop later on.
        match core::mem::replace(self, Self::Empty) {
            Self::Empty => {}
            Self::Inline(mut buffer) => {
                let ptr: *mut T = buffer.as_mut_ptr().cast::<T>();
                // SAFETY:
                // 1. The buffer holds an initialized `T` (guaranteed by the caller)
                // 2. The slot has been reset, so the value is never accessed again
                unsafe {
                    ptr.drop_in_place();
                }
            }
            Self::Heap(ptr) => {
                let ptr: *mut T = ptr.cast::<T>().as_ptr();
                // SAFETY:
                // 1. The pointer came from `Box::<T>::into_raw` (guaranteed by the caller)
                // 2. The slot has been reset, so the pointer is never used again
                let boxed: Box<T> = unsafe { Box::from_raw(ptr) };
                core::mem::drop(boxed);
            }
        }
    }

    /// Moves the stored value into `destination` and leaves `self` empty.
    ///
    /// Inline values are read out of this buffer and written into a fresh
    /// buffer. Heap values are transferred by handing over the pointer, so no
    /// allocation or deallocation happens.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. If the slot is not empty, it holds a `T`.
    /// 2. `destination` is empty. Anything it holds would be leaked.
    #[inline]
    pub(crate) unsafe fn transfer<T: 'static>(&mut self, destination: &mut Self) {
        debug_assert!(destination.is_empty());

        match core::mem::replace(self, Self::Empty) {
            Self::Empty => {}
            Self::Inline(buffer) => {
                let ptr: *const T = buffer.as_ptr().cast::<T>();
                // SAFETY:
                // 1. The buffer holds an initialized `T` (guaranteed by the caller)
                // 2. The slot has been reset and `buffer` is a local that is not read
                //    again, so the value is not duplicated
                let value: T = unsafe { ptr.read() };

                // SAFETY:
                // 1. The value was stored inline, so `T` fits inline
                *destination = unsafe { Self::inline_unchecked(value) };
            }
            heap @ Self::Heap(_) => *destination = heap,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, string::String, vec::Vec};
    use core::cell::Cell;

    use super::*;

    struct DropCounter<P> {
        drops: Rc<Cell<usize>>,
        _payload: P,
    }

    impl<P> Drop for DropCounter<P> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[repr(align(32))]
    struct OverAligned {
        _value: u8,
    }

    #[test]
    fn test_fits_inline() {
        assert!(fits_inline::<()>());
        assert!(fits_inline::<u8>());
        assert!(fits_inline::<usize>());
        assert!(fits_inline::<[usize; 3]>());
        assert!(fits_inline::<String>());
        assert!(fits_inline::<Vec<u64>>());
        assert!(!fits_inline::<[usize; 4]>());
        assert!(!fits_inline::<OverAligned>());
    }

    #[test]
    fn test_buffer_layout() {
        assert_eq!(core::mem::size_of::<InlineBuffer>(), INLINE_CAPACITY);
        assert_eq!(core::mem::align_of::<InlineBuffer>(), INLINE_ALIGN);
    }

    #[test]
    fn test_strategy_selection() {
        let mut small = Slot::new(7_u32);
        let mut large = Slot::new([1_u64; 8]);

        assert!(small.is_inline());
        assert!(matches!(large, Slot::Heap(_)));

        // SAFETY: The slots hold the named types
        unsafe {
            small.destroy::<u32>();
        }
        // SAFETY: The slots hold the named types
        unsafe {
            large.destroy::<[u64; 8]>();
        }
        assert!(small.is_empty());
        assert!(large.is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut slot = Slot::new(String::from("left"));

        // SAFETY: The slot holds a `String`
        let value = unsafe { slot.get_mut::<String>() };
        let Some(value) = value else {
            panic!("slot should hold a value");
        };
        value.push_str("-right");

        // SAFETY: The slot holds a `String`
        let value = unsafe { slot.get_mut::<String>() };
        assert_eq!(value.cloned(), Some(String::from("left-right")));

        // SAFETY: The slot holds a `String`
        unsafe {
            slot.destroy::<String>();
        }

        // SAFETY: The slot is empty
        assert!(unsafe { slot.get_mut::<String>() }.is_none());
    }

    #[test]
    fn test_destroy_drops_once() {
        let drops = Rc::new(Cell::new(0));
        let mut inline = Slot::new(DropCounter {
            drops: drops.clone(),
            _payload: (),
        });
        let mut heap = Slot::new(DropCounter {
            drops: drops.clone(),
            _payload: [0_usize; 8],
        });
        assert!(inline.is_inline());
        assert!(!heap.is_inline());

        // SAFETY: The slot holds the named type
        unsafe {
            inline.destroy::<DropCounter<()>>();
        }
        assert_eq!(drops.get(), 1);

        // SAFETY: The slot holds the named type
        unsafe {
            heap.destroy::<DropCounter<[usize; 8]>>();
        }
        assert_eq!(drops.get(), 2);

        // Destroying an empty slot is a no-op
        // SAFETY: The slot is empty
        unsafe {
            heap.destroy::<DropCounter<[usize; 8]>>();
        }
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn test_transfer_inline() {
        let drops = Rc::new(Cell::new(0));
        let mut source = Slot::new(DropCounter {
            drops: drops.clone(),
            _payload: 5_u8,
        });
        let mut destination = Slot::Empty;

        // SAFETY: The source holds the named type and the destination is empty
        unsafe {
            source.transfer::<DropCounter<u8>>(&mut destination);
        }
        assert!(source.is_empty());
        assert!(destination.is_inline());
        assert_eq!(drops.get(), 0);

        // SAFETY: The slot holds the named type
        unsafe {
            destination.destroy::<DropCounter<u8>>();
        }
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_transfer_heap_keeps_pointer() {
        let mut source = Slot::new([3_u64; 8]);
        let Slot::Heap(before) = source else {
            panic!("large value should be boxed");
        };
        let mut destination = Slot::Empty;

        // SAFETY: The source holds the named type and the destination is empty
        unsafe {
            source.transfer::<[u64; 8]>(&mut destination);
        }
        assert!(source.is_empty());
        let Slot::Heap(after) = destination else {
            panic!("transferred value should stay boxed");
        };
        assert_eq!(before, after);

        // SAFETY: The slot holds the named type
        unsafe {
            destination.destroy::<[u64; 8]>();
        }
    }
}
