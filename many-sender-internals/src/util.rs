//! Internal utility types.

/// Marker type used when type-erasing producers or receivers.
///
/// This zero-sized type serves as a placeholder for the pointee of a heap
/// [`Slot`](crate::slot::Slot) whose concrete type is unknown at the current
/// scope. The empty sender vtable also reports it as its type.
///
/// Using a distinct marker type (rather than `()`) makes the intent clearer
/// in type signatures and error messages.
pub(crate) struct Erased;
