#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`many-sender`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased storage and the unsafe
//! operations that power the [`many-sender`] crate. It erases concrete
//! producer and receiver types behind hand-written vtables of function
//! pointers, so that no trait objects are needed on the submission path.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`many-sender`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`contracts`]**: The [`Receiver`] and [`SubmitTo`] traits every
//!   concrete receiver and producer implements.
//! - **[`slot`]**: The [`Slot`] storage enum. A value is either stored inline
//!   in a fixed [`InlineBuffer`] or boxed on the heap, decided once from its
//!   size and alignment.
//! - **[`sender`]**: Type-erased producer storage
//!   - [`RawManySender`]: Owned producer plus its [`SenderVtable`]
//!   - [`SenderVtable`]: `transfer_or_destroy` and `submit_to` entry points
//! - **[`receiver`]**: Type-erased receiver storage
//!   - [`RawReceiver`]: Owned receiver plus its [`ReceiverVtable`]
//!   - [`ReceiverVtable`]: `drop`, `value`, `error` and `done` entry points
//!
//! # Safety Strategy
//!
//! A [`Slot`] does not know which type it holds. Every typed operation on it is
//! `unsafe` and requires the caller to name the type that was stored. The raw
//! types guarantee this by pairing each slot with a `&'static` vtable created
//! from the same type parameter at the same time the slot was filled:
//!
//! - **Module-based encapsulation**: The `vtable` and `slot` fields are private
//!   to the module that fills them, so the pairing is locally verifiable
//! - **One vtable per type**: Vtables are created in `const` blocks, so every
//!   container of the same concrete type shares one static instance
//! - **Documented vtable contracts**: Each vtable method specifies exactly when
//!   it can be safely called
//!
//! [`many-sender`]: https://docs.rs/many-sender/latest/many_sender/
//! [`Receiver`]: contracts::Receiver
//! [`SubmitTo`]: contracts::SubmitTo
//! [`Slot`]: slot::Slot
//! [`InlineBuffer`]: slot::InlineBuffer
//! [`SenderVtable`]: sender::vtable::SenderVtable
//! [`ReceiverVtable`]: receiver::vtable::ReceiverVtable

extern crate alloc;

pub mod contracts;
mod receiver;
mod sender;
mod slot;
mod util;

pub use receiver::RawReceiver;
pub use sender::RawManySender;
pub use slot::{INLINE_ALIGN, INLINE_CAPACITY, fits_inline};
