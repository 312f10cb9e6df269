use crate::{
    contracts::{Sender, SubmitTo},
    markers::Many,
};

/// The function called by a [`FnSender`] for each submitted receiver.
///
/// Implemented for every `FnMut(R)` closure and for [`Ignore`].
pub trait SubmitFn<R> {
    /// Handles one submitted receiver.
    fn invoke(&mut self, receiver: R);
}

impl<F, R> SubmitFn<R> for F
where
    F: FnMut(R),
{
    #[inline]
    fn invoke(&mut self, receiver: R) {
        (self)(receiver);
    }
}

/// A [`SubmitFn`] that drops every receiver without signalling it.
///
/// This is the function of the sender built from `()` by
/// [`make_many_sender`](crate::make_many_sender).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ignore;

impl<R> SubmitFn<R> for Ignore {
    #[inline]
    fn invoke(&mut self, receiver: R) {
        drop(receiver);
    }
}

/// A many-value sender backed by a function of the receiver.
///
/// Submitting a receiver calls the function with it. The function may call
/// the receiver right away, or keep it and call it later.
///
/// # Examples
///
/// ```
/// use many_sender::{FnSender, Receiver, SubmitTo, receiver::{self, Signal}};
///
/// let mut sender = FnSender::new(|mut out: receiver::ChannelReceiver<(), char>| {
///     "hi".chars().for_each(|c| out.value(c));
///     out.done();
/// });
///
/// let (out, signals) = receiver::channel();
/// sender.submit(out);
/// assert_eq!(
///     signals.try_iter().collect::<Vec<_>>(),
///     [Signal::Value('h'), Signal::Value('i'), Signal::Done]
/// );
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct FnSender<F> {
    submit_fn: F,
}

impl<F> FnSender<F> {
    /// Creates a sender that calls `submit_fn` for each submitted receiver.
    #[inline]
    pub const fn new(submit_fn: F) -> Self {
        Self { submit_fn }
    }

    /// Returns the wrapped function.
    #[inline]
    pub fn into_inner(self) -> F {
        self.submit_fn
    }
}

impl<F> Sender for FnSender<F> {
    type Cardinality = Many;
}

impl<F, R> SubmitTo<R> for FnSender<F>
where
    F: SubmitFn<R>,
{
    #[inline]
    fn submit(&mut self, receiver: R) {
        SubmitFn::invoke(&mut self.submit_fn, receiver);
    }
}
