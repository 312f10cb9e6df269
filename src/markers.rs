//! Marker types describing how many values a sender delivers.
//!
//! Every [`Sender`](crate::Sender) names one of these as its
//! `Cardinality`. [`AnyManySender`](crate::AnyManySender), the adapters and
//! the factory only accept senders whose cardinality is [`Many`].
//!
//! A sender that declares [`Single`] is rejected at compile time:
//!
//! ```compile_fail
//! use many_sender::{AnyManySender, AnyReceiver, Receiver, Sender, SubmitTo, markers::Single};
//!
//! struct JustOne;
//!
//! impl Sender for JustOne {
//!     type Cardinality = Single;
//! }
//!
//! impl SubmitTo<AnyReceiver<(), u8>> for JustOne {
//!     fn submit(&mut self, mut receiver: AnyReceiver<(), u8>) {
//!         receiver.value(1);
//!         receiver.done();
//!     }
//! }
//!
//! let _ = AnyManySender::<(), u8>::from_producer(JustOne);
//! ```
//!
//! The set of cardinalities is closed: [`Cardinality`] cannot be implemented
//! outside this crate.

mod sealed {
    pub trait Sealed {}
}

/// The cardinality of a [`Sender`](crate::Sender).
///
/// Implemented only by [`Many`] and [`Single`].
pub trait Cardinality: sealed::Sealed + 'static {}

/// Marker for senders that deliver any number of values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Many;

/// Marker for senders that deliver at most one value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Single;

impl sealed::Sealed for Many {}
impl Cardinality for Many {}

impl sealed::Sealed for Single {}
impl Cardinality for Single {}
