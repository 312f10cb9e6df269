//! The traits that senders and receivers implement.
//!
//! [`Receiver`] and [`SubmitTo`] are defined in `many-sender-internals` and
//! re-exported here. This module adds [`Sender`], which attaches a
//! [cardinality](crate::markers) to a sender type, and [`ManySenderTo`], the
//! combined bound used throughout the crate.

pub use many_sender_internals::contracts::{Receiver, SubmitTo};

use crate::markers::{Cardinality, Many};

/// A type that delivers values to receivers.
///
/// The associated `Cardinality` is either [`Many`] or
/// [`Single`](crate::markers::Single). Only many-value senders can be stored
/// in an [`AnyManySender`](crate::AnyManySender).
///
/// # Examples
///
/// ```
/// use many_sender::{Receiver, Sender, SubmitTo, markers::Many};
///
/// struct Countdown(u32);
///
/// impl Sender for Countdown {
///     type Cardinality = Many;
/// }
///
/// impl<R: Receiver<(), u32>> SubmitTo<R> for Countdown {
///     fn submit(&mut self, mut receiver: R) {
///         for n in (1..=self.0).rev() {
///             receiver.value(n);
///         }
///         receiver.done();
///     }
/// }
/// ```
pub trait Sender {
    /// How many values this sender may deliver.
    type Cardinality: Cardinality;
}

/// A many-value sender that accepts receivers of type `R`.
///
/// Implemented automatically for every type that is both a
/// `Sender<Cardinality = Many>` and a [`SubmitTo<R>`].
pub trait ManySenderTo<R>: Sender<Cardinality = Many> + SubmitTo<R> {}

impl<S, R> ManySenderTo<R> for S where S: Sender<Cardinality = Many> + SubmitTo<R> {}
