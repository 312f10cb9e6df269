use core::{any::TypeId, fmt};

use many_sender_internals::RawReceiver;

use crate::{contracts::Receiver, util::try_downcast};

/// A receiver of any concrete type that accepts errors of type `E` and values
/// of type `V`.
///
/// This is the receiver type that an [`AnyManySender<E, V>`] hands to the
/// sender it holds. Signals are forwarded to the wrapped receiver unchanged.
///
/// Small receivers are stored inline and never allocate. Wrapping a value
/// that is already an `AnyReceiver<E, V>` returns it as is.
///
/// [`AnyManySender<E, V>`]: crate::AnyManySender
///
/// # Examples
///
/// ```
/// use many_sender::{
///     AnyReceiver, Receiver,
///     receiver::{self, Signal},
/// };
///
/// let (out, signals) = receiver::channel::<String, u8>();
/// let mut erased = AnyReceiver::new(out);
/// erased.value(4);
/// erased.error(String::from("stopped"));
///
/// assert_eq!(
///     signals.try_iter().collect::<Vec<_>>(),
///     [Signal::Value(4), Signal::Error(String::from("stopped"))]
/// );
/// ```
#[repr(transparent)]
pub struct AnyReceiver<E: 'static, V: 'static> {
    raw: RawReceiver<E, V>,
}

impl<E: 'static, V: 'static> AnyReceiver<E, V> {
    /// Wraps `receiver`.
    ///
    /// If `receiver` is already an `AnyReceiver<E, V>` it is returned without
    /// a second layer of erasure.
    #[must_use]
    pub fn new<R>(receiver: R) -> Self
    where
        R: Receiver<E, V> + Send + 'static,
    {
        match try_downcast::<R, Self>(receiver) {
            Ok(erased) => erased,
            Err(receiver) => Self {
                raw: RawReceiver::new(receiver),
            },
        }
    }

    /// Returns the [`TypeId`] of the wrapped receiver.
    #[inline]
    pub fn receiver_type_id(&self) -> TypeId {
        self.raw.receiver_type_id()
    }

    /// Returns the type name of the wrapped receiver.
    #[inline]
    pub fn receiver_type_name(&self) -> &'static str {
        self.raw.receiver_type_name()
    }

    /// Returns `true` if the wrapped receiver is stored inline.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.raw.is_inline()
    }
}

impl<E: 'static, V: 'static> Receiver<E, V> for AnyReceiver<E, V> {
    #[inline]
    fn value(&mut self, value: V) {
        self.raw.value(value);
    }

    #[inline]
    fn error(&mut self, error: E) {
        self.raw.error(error);
    }

    #[inline]
    fn done(&mut self) {
        self.raw.done();
    }
}

impl<E: 'static, V: 'static> fmt::Debug for AnyReceiver<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyReceiver")
            .field("receiver", &self.receiver_type_name())
            .field("inline", &self.is_inline())
            .finish()
    }
}

// SAFETY: `AnyReceiver::new` is the only way to fill `raw`, and it requires
// the receiver to be `Send`. The vtable only holds function pointers.
unsafe impl<E: 'static, V: 'static> Send for AnyReceiver<E, V> {}
