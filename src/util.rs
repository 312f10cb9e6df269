//! Internal utility functions.

use core::{any::TypeId, mem::ManuallyDrop};

/// Returns `value` as a `U` if `T` and `U` are the same type, and gives it
/// back unchanged otherwise.
///
/// Used to recognise values that are already erased, so that they are not
/// wrapped a second time.
pub(crate) fn try_downcast<T: 'static, U: 'static>(value: T) -> Result<U, T> {
    if TypeId::of::<T>() != TypeId::of::<U>() {
        return Err(value);
    }
    let value = ManuallyDrop::new(value);
    let ptr: *const U = (&raw const *value).cast::<U>();
    // SAFETY: `T` and `U` have the same `TypeId`, so they are the same type.
    // The original is wrapped in `ManuallyDrop`, so the read is a move and the
    // value is dropped exactly once, by the caller.
    Ok(unsafe { ptr.read() })
}
