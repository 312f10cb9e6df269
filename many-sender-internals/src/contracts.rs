//! The structural contracts that concrete receivers and producers implement.
//!
//! These two traits are the only boundary between the erased storage in this
//! crate and user code. A receiver accepts values of type `V`, a terminal error
//! of type `E`, and a terminal completion. A producer accepts a receiver of
//! type `R` through [`SubmitTo::submit`] and drives it from there.

/// A consumer of the signals produced by a sender.
///
/// A sender delivers zero or more values followed by at most one terminal
/// signal, either [`error`](Receiver::error) or [`done`](Receiver::done).
/// No further signals are expected after a terminal signal.
///
/// Several values per signal are expressed by choosing a tuple for `V`.
///
/// # Examples
///
/// ```
/// use many_sender_internals::contracts::Receiver;
///
/// #[derive(Default)]
/// struct Sum {
///     total: i64,
///     finished: bool,
/// }
///
/// impl Receiver<String, i64> for Sum {
///     fn value(&mut self, value: i64) {
///         self.total += value;
///     }
///
///     fn error(&mut self, _error: String) {
///         self.finished = true;
///     }
///
///     fn done(&mut self) {
///         self.finished = true;
///     }
/// }
///
/// let mut sum = Sum::default();
/// sum.value(2);
/// sum.value(3);
/// sum.done();
/// assert_eq!(sum.total, 5);
/// assert!(sum.finished);
/// ```
pub trait Receiver<E, V> {
    /// Accepts one value.
    fn value(&mut self, value: V);

    /// Accepts the terminal error.
    fn error(&mut self, error: E);

    /// Accepts the terminal completion.
    fn done(&mut self);
}

/// A producer that can be submitted to a receiver of type `R`.
///
/// Calling [`submit`](SubmitTo::submit) starts one logical subscription. The
/// call returns once control has been handed to the producer. Whether signals
/// arrive before it returns or later, from another thread, is up to the
/// producer.
pub trait SubmitTo<R> {
    /// Starts delivering signals to `receiver`.
    fn submit(&mut self, receiver: R);
}
