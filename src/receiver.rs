//! Ready-made receivers.
//!
//! - [`from_fns`] builds a receiver from three closures.
//! - [`channel`] (requires the `std` feature) forwards every signal, as a
//!   [`Signal`], into a [`std::sync::mpsc`] channel.

use crate::contracts::Receiver;

/// One signal delivered to a receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal<E, V> {
    /// A value.
    Value(V),
    /// The terminal error.
    Error(E),
    /// The terminal completion.
    Done,
}

impl<E, V> Signal<E, V> {
    /// Returns `true` for [`Signal::Error`] and [`Signal::Done`].
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Signal::Value(_))
    }

    /// Returns the value, if this is a [`Signal::Value`].
    #[inline]
    pub fn into_value(self) -> Option<V> {
        match self {
            Signal::Value(value) => Some(value),
            Signal::Error(_) | Signal::Done => None,
        }
    }

    /// Returns the error, if this is a [`Signal::Error`].
    #[inline]
    pub fn into_error(self) -> Option<E> {
        match self {
            Signal::Error(error) => Some(error),
            Signal::Value(_) | Signal::Done => None,
        }
    }

    /// Delivers this signal to `receiver`.
    #[inline]
    pub fn deliver_to<R: Receiver<E, V> + ?Sized>(self, receiver: &mut R) {
        match self {
            Signal::Value(value) => receiver.value(value),
            Signal::Error(error) => receiver.error(error),
            Signal::Done => receiver.done(),
        }
    }
}

/// A receiver built from three closures. Created by [`from_fns`].
#[derive(Clone, Copy, Debug)]
pub struct FnReceiver<VF, EF, DF> {
    on_value: VF,
    on_error: EF,
    on_done: DF,
}

/// Builds a receiver that calls `on_value` for each value, `on_error` for the
/// error and `on_done` for the completion.
///
/// # Examples
///
/// ```
/// use many_sender::{Receiver, receiver};
///
/// let mut total = 0;
/// let mut finished = false;
/// let mut sum = receiver::from_fns(|v: i32| total += v, |_: ()| {}, || finished = true);
/// sum.value(3);
/// sum.value(4);
/// sum.done();
/// drop(sum);
///
/// assert_eq!(total, 7);
/// assert!(finished);
/// ```
#[inline]
pub fn from_fns<VF, EF, DF>(on_value: VF, on_error: EF, on_done: DF) -> FnReceiver<VF, EF, DF> {
    FnReceiver {
        on_value,
        on_error,
        on_done,
    }
}

impl<E, V, VF, EF, DF> Receiver<E, V> for FnReceiver<VF, EF, DF>
where
    VF: FnMut(V),
    EF: FnMut(E),
    DF: FnMut(),
{
    #[inline]
    fn value(&mut self, value: V) {
        (self.on_value)(value);
    }

    #[inline]
    fn error(&mut self, error: E) {
        (self.on_error)(error);
    }

    #[inline]
    fn done(&mut self) {
        (self.on_done)();
    }
}

#[cfg(feature = "std")]
pub use self::mpsc_channel::{ChannelReceiver, channel};

#[cfg(feature = "std")]
mod mpsc_channel {
    use std::sync::mpsc;

    use super::Signal;
    use crate::contracts::Receiver;

    /// A receiver that sends every signal into a [`mpsc`] channel. Created by
    /// [`channel`].
    ///
    /// Signals sent after the receiving half was dropped are discarded.
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[derive(Debug)]
    pub struct ChannelReceiver<E, V> {
        sender: mpsc::Sender<Signal<E, V>>,
    }

    impl<E, V> Clone for ChannelReceiver<E, V> {
        fn clone(&self) -> Self {
            Self {
                sender: self.sender.clone(),
            }
        }
    }

    impl<E, V> From<mpsc::Sender<Signal<E, V>>> for ChannelReceiver<E, V> {
        fn from(sender: mpsc::Sender<Signal<E, V>>) -> Self {
            Self { sender }
        }
    }

    impl<E, V> Receiver<E, V> for ChannelReceiver<E, V> {
        fn value(&mut self, value: V) {
            let _ = self.sender.send(Signal::Value(value));
        }

        fn error(&mut self, error: E) {
            let _ = self.sender.send(Signal::Error(error));
        }

        fn done(&mut self) {
            let _ = self.sender.send(Signal::Done);
        }
    }

    /// Creates a [`ChannelReceiver`] and the [`mpsc::Receiver`] its signals
    /// arrive on.
    ///
    /// # Examples
    ///
    /// ```
    /// use many_sender::{Receiver, receiver::{self, Signal}};
    ///
    /// let (mut out, signals) = receiver::channel::<(), &str>();
    /// std::thread::spawn(move || {
    ///     out.value("ping");
    ///     out.done();
    /// })
    /// .join()
    /// .unwrap();
    ///
    /// assert_eq!(
    ///     signals.iter().collect::<Vec<_>>(),
    ///     [Signal::Value("ping"), Signal::Done]
    /// );
    /// ```
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn channel<E, V>() -> (ChannelReceiver<E, V>, mpsc::Receiver<Signal<E, V>>) {
        let (sender, receiver) = mpsc::channel();
        (ChannelReceiver { sender }, receiver)
    }
}
