#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A type-erased, move-only container for senders that deliver many values.
//!
//! ## Overview
//!
//! A **sender** is a value that, once submitted to a **receiver**, delivers
//! zero or more values followed by at most one terminal signal: an error or a
//! completion. This crate provides [`AnyManySender<E, V>`], a container that
//! can hold *any* such sender delivering values of type `V` and errors of type
//! `E`, without the caller knowing the sender's concrete type.
//!
//! The container does not use trait objects. Each concrete sender type gets
//! one static table of function pointers, and the sender itself is stored
//! directly inside the container when it is small enough, so wrapping small
//! senders never allocates.
//!
//! ## Quick Example
//!
//! ```
//! use many_sender::{
//!     prelude::*,
//!     receiver::{self, Signal},
//! };
//!
//! let mut sender: AnyManySender<&'static str, i32> =
//!     make_any_many_sender(|mut out: AnyReceiver<&'static str, i32>| {
//!         out.value(1);
//!         out.value(2);
//!         out.done();
//!     });
//!
//! let (out, signals) = receiver::channel();
//! sender.submit(out);
//!
//! assert_eq!(
//!     signals.try_iter().collect::<Vec<_>>(),
//!     [Signal::Value(1), Signal::Value(2), Signal::Done]
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Receivers** implement [`Receiver<E, V>`]: `value`, `error` and `done`.
//!   Receivers are moved into the sender on submission, so they must be
//!   `Send + 'static`. A sender may hand its receiver to another thread.
//! - **Senders** implement [`Sender`], which declares their
//!   [cardinality](markers), and [`SubmitTo<R>`], which accepts a receiver. A
//!   many-value sender declares `Cardinality = Many`.
//! - **[`AnyManySender<E, V>`]** accepts every many-value sender that can be
//!   submitted to an [`AnyReceiver<E, V>`], the erased form of any receiver.
//!   It is itself a many-value sender.
//!
//! ## Adapters and the Factory
//!
//! Most senders do not need a hand-written type:
//!
//! - [`FnSender`] turns a closure taking the receiver into a sender.
//! - [`DataFnSender`] pairs a piece of data with a closure taking the data and
//!   the receiver. It can lend the data to every submission
//!   ([`submit_sharing`](DataFnSender::submit_sharing)) or give it away to a
//!   single one ([`submit_consuming`](DataFnSender::submit_consuming)).
//! - [`make_many_sender`] picks the right adapter for its input at compile time,
//!   and [`make_any_many_sender`] also erases the result.
//!
//! ## Storage
//!
//! A sender whose size is at most [`INLINE_CAPACITY`] bytes and whose
//! alignment is at most [`INLINE_ALIGN`] is stored inline. Larger senders are
//! boxed once when the container is built and freed once when it is dropped.
//! Moving a container never allocates.
//!
//! ## Empty Containers
//!
//! [`AnyManySender::new`] and [`Default`] create an empty container. Submitting
//! to it drops the receiver without signalling it. [`AnyManySender::take`]
//! moves the sender out and leaves an empty container behind.
//!
//! ## Features
//!
//! - `std` (default): enables [`receiver::channel`].
//! - `tracing`: emits [`tracing`](https://docs.rs/tracing) events when a
//!   sender is erased and when a receiver is submitted to an empty container.
//!
//! For implementation details, see the [`many-sender-internals`] crate.
//!
//! [`many-sender-internals`]: many_sender_internals

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod adapters;
mod any_receiver;
mod any_sender;
pub mod contracts;
mod factory;
mod macros;
pub mod markers;
pub mod prelude;
pub mod receiver;
mod util;

pub use many_sender_internals::{INLINE_ALIGN, INLINE_CAPACITY, fits_inline};

pub use self::{
    adapters::{
        DataFnSender, DataSubmitFn, DataSubmitFnOnce, FnSender, Ignore, PassThrough, SubmitFn,
    },
    any_receiver::AnyReceiver,
    any_sender::AnyManySender,
    contracts::{ManySenderTo, Receiver, Sender, SubmitTo},
    factory::{
        FromData, FromFn, FromNothing, FromSender, IntoManySender, make_any_many_sender,
        make_many_sender,
    },
};
