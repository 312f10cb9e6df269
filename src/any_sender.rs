use core::{any::TypeId, fmt};

use many_sender_internals::RawManySender;

use crate::{
    any_receiver::AnyReceiver,
    contracts::{ManySenderTo, Receiver, Sender, SubmitTo},
    macros::{debug_event, trace_event},
    markers::Many,
    util::try_downcast,
};

/// A move-only container for any sender that delivers many values of type `V`
/// and possibly an error of type `E`.
///
/// The container is either empty or owns exactly one sender. Submitting a
/// receiver forwards it, erased as an [`AnyReceiver<E, V>`], to the owned
/// sender. Submitting to an empty container drops the receiver without
/// signalling it.
///
/// Senders small enough to fit the inline buffer (see
/// [`fits_inline`](crate::fits_inline)) are stored without allocating. Larger
/// senders are boxed once when the container is built.
///
/// # Examples
///
/// ```
/// use many_sender::{
///     AnyManySender, AnyReceiver, Receiver,
///     receiver::{self, Signal},
/// };
///
/// let mut ticks = 0;
/// let mut sender = AnyManySender::<(), u32>::from_producer(many_sender::FnSender::new(
///     move |mut out: AnyReceiver<(), u32>| {
///         ticks += 1;
///         out.value(ticks);
///         out.done();
///     },
/// ));
///
/// let (out, signals) = receiver::channel();
/// sender.submit(out.clone());
/// sender.submit(out);
///
/// assert_eq!(
///     signals.try_iter().collect::<Vec<_>>(),
///     [Signal::Value(1), Signal::Done, Signal::Value(2), Signal::Done]
/// );
/// ```
#[repr(transparent)]
pub struct AnyManySender<E: 'static, V: 'static> {
    raw: RawManySender<AnyReceiver<E, V>>,
}

impl<E: 'static, V: 'static> AnyManySender<E, V> {
    /// Creates an empty container.
    ///
    /// # Examples
    ///
    /// ```
    /// use many_sender::AnyManySender;
    ///
    /// let sender = AnyManySender::<(), u8>::new();
    /// assert!(sender.is_empty());
    /// assert_eq!(sender.producer_type_id(), None);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawManySender::empty(),
        }
    }

    /// Creates a container that owns `producer`.
    ///
    /// If `producer` is itself an `AnyManySender<E, V>` it is returned as is,
    /// so nesting never adds a layer of indirection.
    pub fn from_producer<P>(producer: P) -> Self
    where
        P: ManySenderTo<AnyReceiver<E, V>> + Send + 'static,
    {
        match try_downcast::<P, Self>(producer) {
            Ok(erased) => erased,
            Err(producer) => {
                let raw = RawManySender::new(producer);
                trace_event!(
                    producer = core::any::type_name::<P>(),
                    inline = raw.is_inline(),
                    "erased many-value sender"
                );
                Self { raw }
            }
        }
    }

    /// Returns `true` if the container holds no sender.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if the sender is stored inline. Returns `false` for an
    /// empty container.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.raw.is_inline()
    }

    /// Returns the [`TypeId`] of the owned sender, or `None` if the container
    /// is empty.
    #[inline]
    pub fn producer_type_id(&self) -> Option<TypeId> {
        self.raw.producer_type_id()
    }

    /// Returns the type name of the owned sender, or `None` if the container
    /// is empty.
    #[inline]
    pub fn producer_type_name(&self) -> Option<&'static str> {
        self.raw.producer_type_name()
    }

    /// Submits `receiver` to the owned sender.
    ///
    /// The receiver is dropped without being signalled if the container is
    /// empty.
    pub fn submit<R>(&mut self, receiver: R)
    where
        R: Receiver<E, V> + Send + 'static,
    {
        if self.raw.is_empty() {
            debug_event!(
                receiver = core::any::type_name::<R>(),
                "receiver submitted to an empty AnyManySender was dropped"
            );
            return;
        }
        self.raw.submit(AnyReceiver::new(receiver));
    }

    /// Moves the owned sender into a new container and leaves this one empty.
    ///
    /// No allocation takes place: an inline sender is moved between inline
    /// buffers and a boxed sender changes owner.
    ///
    /// # Examples
    ///
    /// ```
    /// use many_sender::{AnyManySender, make_any_many_sender};
    ///
    /// let mut source: AnyManySender<(), u8> = make_any_many_sender(());
    /// let destination = source.take();
    /// assert!(source.is_empty());
    /// assert!(!destination.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            raw: self.raw.take(),
        }
    }

    /// Drops the sender currently owned by `self`, then moves the sender of
    /// `source` into `self`, leaving `source` empty.
    #[inline]
    pub fn move_from(&mut self, source: &mut Self) {
        self.raw.move_from(&mut source.raw);
    }

    /// Drops the owned sender and leaves the container empty.
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<E: 'static, V: 'static> Default for AnyManySender<E, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static, V: 'static> Sender for AnyManySender<E, V> {
    type Cardinality = Many;
}

impl<E, V, R> SubmitTo<R> for AnyManySender<E, V>
where
    E: 'static,
    V: 'static,
    R: Receiver<E, V> + Send + 'static,
{
    #[inline]
    fn submit(&mut self, receiver: R) {
        AnyManySender::submit(self, receiver);
    }
}

impl<E: 'static, V: 'static> fmt::Debug for AnyManySender<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyManySender")
            .field("producer", &self.producer_type_name())
            .field("inline", &self.is_inline())
            .finish()
    }
}

// SAFETY: `AnyManySender::from_producer` is the only way to fill `raw`, and it
// requires the producer to be `Send`. The vtable only holds function pointers.
unsafe impl<E: 'static, V: 'static> Send for AnyManySender<E, V> {}

// SAFETY: every method that touches the producer takes `&mut self`, so a
// shared reference gives no access to it.
unsafe impl<E: 'static, V: 'static> Sync for AnyManySender<E, V> {}
